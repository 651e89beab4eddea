use crate::rows::{id_u32, opt_id_u32};
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{NewsItem, slugify};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_news(row: &SqliteRow) -> NewsItem {
    NewsItem {
        id: id_u32(row.get("id")),
        title: row.get("title"),
        body: row.get("body"),
        slug: row.get("slug"),
        author_id: opt_id_u32(row.get("author_id")),
        federation_id: opt_id_u32(row.get("federation_id")),
        is_public: row.get("is_public"),
        published_at: row.get("published_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Storage {
    pub async fn create_news_item(
        &self,
        title: &str,
        body: &str,
        author_id: u32,
        federation_id: Option<u32>,
        is_public: bool,
    ) -> StoreResult<NewsItem> {
        let slug = slugify(title);
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO news_items \
             (title, body, slug, author_id, federation_id, is_public, published_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(body)
        .bind(&slug)
        .bind(author_id as i64)
        .bind(federation_id.map(|id| id as i64))
        .bind(is_public)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(NewsItem {
            id: result.last_insert_rowid() as u32,
            title: title.to_string(),
            body: body.to_string(),
            slug,
            author_id: Some(author_id),
            federation_id,
            is_public,
            published_at: now,
            updated_at: now,
        })
    }

    /// Public feed, newest first.
    pub async fn public_news(&self) -> StoreResult<Vec<NewsItem>> {
        let rows = sqlx::query(
            "SELECT * FROM news_items WHERE is_public = 1 ORDER BY published_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_news).collect())
    }

    pub async fn news_by_slug(&self, slug: &str) -> StoreResult<Option<NewsItem>> {
        let row = sqlx::query("SELECT * FROM news_items WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_news))
    }
}
