use crate::rows::{id_u32, opt_id_u32};
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{AssignedPenalty, Penalty};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_penalty(row: &SqliteRow) -> Penalty {
    Penalty {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        title: row.get("title"),
        amount_cents: row.get("amount_cents"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

fn map_assigned(row: &SqliteRow) -> AssignedPenalty {
    AssignedPenalty {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        user_id: id_u32(row.get("user_id")),
        penalty_id: id_u32(row.get("penalty_id")),
        assigned_at: row.get("assigned_at"),
        note: row.get("note"),
        paid: row.get("paid"),
        assigned_by: opt_id_u32(row.get("assigned_by")),
    }
}

impl Storage {
    pub async fn create_penalty(
        &self,
        team_id: u32,
        title: &str,
        amount_cents: i64,
        description: &str,
    ) -> StoreResult<Penalty> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO penalties (team_id, title, amount_cents, description, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(team_id as i64)
        .bind(title)
        .bind(amount_cents)
        .bind(description)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(Penalty {
            id: result.last_insert_rowid() as u32,
            team_id,
            title: title.to_string(),
            amount_cents,
            description: description.to_string(),
            created_at,
        })
    }

    /// Catalog of a team, ordered by title.
    pub async fn penalties_for_team(&self, team_id: u32) -> StoreResult<Vec<Penalty>> {
        let rows = sqlx::query("SELECT * FROM penalties WHERE team_id = ? ORDER BY title")
            .bind(team_id as i64)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_penalty).collect())
    }

    pub async fn penalty_by_id(&self, team_id: u32, penalty_id: u32) -> StoreResult<Option<Penalty>> {
        let row = sqlx::query("SELECT * FROM penalties WHERE id = ? AND team_id = ?")
            .bind(penalty_id as i64)
            .bind(team_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_penalty))
    }

    pub async fn assign_penalty(
        &self,
        team_id: u32,
        user_id: u32,
        penalty_id: u32,
        note: &str,
        assigned_by: u32,
    ) -> StoreResult<AssignedPenalty> {
        let assigned_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO assigned_penalties \
             (team_id, user_id, penalty_id, assigned_at, note, paid, assigned_by) \
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(team_id as i64)
        .bind(user_id as i64)
        .bind(penalty_id as i64)
        .bind(assigned_at)
        .bind(note)
        .bind(assigned_by as i64)
        .execute(self.pool())
        .await?;

        Ok(AssignedPenalty {
            id: result.last_insert_rowid() as u32,
            team_id,
            user_id,
            penalty_id,
            assigned_at,
            note: note.to_string(),
            paid: false,
            assigned_by: Some(assigned_by),
        })
    }

    /// Assignments of a team, newest first.
    pub async fn assigned_penalties_for_team(
        &self,
        team_id: u32,
    ) -> StoreResult<Vec<AssignedPenalty>> {
        let rows = sqlx::query(
            "SELECT * FROM assigned_penalties WHERE team_id = ? ORDER BY assigned_at DESC, id DESC",
        )
        .bind(team_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_assigned).collect())
    }

    pub async fn assigned_penalty_by_id(
        &self,
        team_id: u32,
        assigned_id: u32,
    ) -> StoreResult<Option<AssignedPenalty>> {
        let row = sqlx::query("SELECT * FROM assigned_penalties WHERE id = ? AND team_id = ?")
            .bind(assigned_id as i64)
            .bind(team_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_assigned))
    }

    /// One-way unpaid → paid transition; already-paid rows are left
    /// untouched.
    pub async fn mark_assigned_penalty_paid(
        &self,
        team_id: u32,
        assigned_id: u32,
    ) -> StoreResult<Option<AssignedPenalty>> {
        sqlx::query("UPDATE assigned_penalties SET paid = 1 WHERE id = ? AND team_id = ?")
            .bind(assigned_id as i64)
            .bind(team_id as i64)
            .execute(self.pool())
            .await?;
        self.assigned_penalty_by_id(team_id, assigned_id).await
    }
}
