use crate::stores::users::map_user;
use crate::{StoreResult, Storage};
use chrono::{DateTime, Utc};
use sportdesk_core::User;

impl Storage {
    pub async fn create_session(
        &self,
        user_id: u32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id as i64)
            .bind(expires_at)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Resolves a session token to its user, ignoring expired rows.
    pub async fn session_user(&self, token: &str, now: DateTime<Utc>) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT u.* FROM users u \
             JOIN sessions s ON s.user_id = u.id \
             WHERE s.token = ? AND s.expires_at > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    pub async fn delete_session(&self, token: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Housekeeping, run at login time.
    pub async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
