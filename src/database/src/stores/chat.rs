use crate::rows::id_u32;
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::ChatMessage;
use sportdesk_core::team::CHAT_PAGE_SIZE;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_message(row: &SqliteRow) -> ChatMessage {
    ChatMessage {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        user_id: id_u32(row.get("user_id")),
        text: row.get("text"),
        created_at: row.get("created_at"),
    }
}

impl Storage {
    pub async fn add_chat_message(
        &self,
        team_id: u32,
        user_id: u32,
        text: &str,
    ) -> StoreResult<ChatMessage> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO chat_messages (team_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(team_id as i64)
        .bind(user_id as i64)
        .bind(text)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(ChatMessage {
            id: result.last_insert_rowid() as u32,
            team_id,
            user_id,
            text: text.to_string(),
            created_at,
        })
    }

    /// One page of team chat, newest first. Pages are 1-based.
    pub async fn chat_messages_page(
        &self,
        team_id: u32,
        page: u32,
    ) -> StoreResult<Vec<ChatMessage>> {
        let page = page.max(1);
        let offset = (page - 1) * CHAT_PAGE_SIZE;
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE team_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(team_id as i64)
        .bind(CHAT_PAGE_SIZE as i64)
        .bind(offset as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_message).collect())
    }

    pub async fn chat_message_count(&self, team_id: u32) -> StoreResult<u32> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM chat_messages WHERE team_id = ?")
            .bind(team_id as i64)
            .fetch_one(self.pool())
            .await?;
        Ok(row.get::<i64, _>("n") as u32)
    }
}
