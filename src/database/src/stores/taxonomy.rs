use crate::rows::id_u32;
use crate::{StoreResult, Storage};
use sportdesk_core::{AgeGroup, Sport, slugify};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_sport(row: &SqliteRow) -> Sport {
    Sport {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
    }
}

fn map_age_group(row: &SqliteRow) -> AgeGroup {
    AgeGroup {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        order: row.get::<i64, _>("sort_order") as u32,
    }
}

impl Storage {
    pub async fn create_sport(&self, name: &str) -> StoreResult<Sport> {
        let slug = slugify(name);
        let result = sqlx::query("INSERT INTO sports (name, slug) VALUES (?, ?)")
            .bind(name)
            .bind(&slug)
            .execute(self.pool())
            .await?;

        Ok(Sport {
            id: result.last_insert_rowid() as u32,
            name: name.to_string(),
            slug,
        })
    }

    pub async fn sports(&self) -> StoreResult<Vec<Sport>> {
        let rows = sqlx::query("SELECT * FROM sports ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_sport).collect())
    }

    pub async fn sport_by_id(&self, id: u32) -> StoreResult<Option<Sport>> {
        let row = sqlx::query("SELECT * FROM sports WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_sport))
    }

    pub async fn age_groups(&self) -> StoreResult<Vec<AgeGroup>> {
        let rows = sqlx::query("SELECT * FROM age_groups ORDER BY sort_order")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_age_group).collect())
    }

    /// Distinct sport names currently in use by teams, for the public
    /// landing page menu.
    pub async fn sport_names_in_use(&self) -> StoreResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT DISTINCT s.name AS name FROM sports s \
             JOIN teams t ON t.sport_id = s.id ORDER BY s.name",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(|r| r.get("name")).collect())
    }
}
