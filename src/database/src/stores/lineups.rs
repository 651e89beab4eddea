use crate::rows::{id_u32, opt_id_u32};
use crate::{StoreResult, Storage};
use chrono::{DateTime, Utc};
use sportdesk_core::Lineup;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_lineup(row: &SqliteRow) -> Lineup {
    Lineup {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        name: row.get("name"),
        date: row.get("date"),
        player_ids: Vec::new(),
        created_by: opt_id_u32(row.get("created_by")),
        is_public: row.get("is_public"),
        created_at: row.get("created_at"),
    }
}

pub struct LineupFields {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub player_ids: Vec<u32>,
    pub is_public: bool,
}

impl Storage {
    pub async fn create_lineup(
        &self,
        team_id: u32,
        created_by: u32,
        fields: LineupFields,
    ) -> StoreResult<Lineup> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO lineups (team_id, name, date, created_by, is_public, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(team_id as i64)
        .bind(&fields.name)
        .bind(fields.date)
        .bind(created_by as i64)
        .bind(fields.is_public)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let lineup_id = result.last_insert_rowid();
        for user_id in &fields.player_ids {
            sqlx::query("INSERT OR IGNORE INTO lineup_players (lineup_id, user_id) VALUES (?, ?)")
                .bind(lineup_id)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.lineup_by_id(team_id, lineup_id as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_lineup(
        &self,
        team_id: u32,
        lineup_id: u32,
        fields: LineupFields,
    ) -> StoreResult<Option<Lineup>> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "UPDATE lineups SET name = ?, date = ?, is_public = ? WHERE id = ? AND team_id = ?",
        )
        .bind(&fields.name)
        .bind(fields.date)
        .bind(fields.is_public)
        .bind(lineup_id as i64)
        .bind(team_id as i64)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM lineup_players WHERE lineup_id = ?")
            .bind(lineup_id as i64)
            .execute(&mut *tx)
            .await?;
        for user_id in &fields.player_ids {
            sqlx::query("INSERT OR IGNORE INTO lineup_players (lineup_id, user_id) VALUES (?, ?)")
                .bind(lineup_id as i64)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.lineup_by_id(team_id, lineup_id).await
    }

    pub async fn delete_lineup(&self, team_id: u32, lineup_id: u32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM lineups WHERE id = ? AND team_id = ?")
            .bind(lineup_id as i64)
            .bind(team_id as i64)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn lineup_by_id(&self, team_id: u32, lineup_id: u32) -> StoreResult<Option<Lineup>> {
        let row = sqlx::query("SELECT * FROM lineups WHERE id = ? AND team_id = ?")
            .bind(lineup_id as i64)
            .bind(team_id as i64)
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => {
                let mut lineup = map_lineup(&row);
                lineup.player_ids = self.lineup_player_ids(lineup.id).await?;
                Ok(Some(lineup))
            }
            None => Ok(None),
        }
    }

    /// All lineups of a team, newest date first.
    pub async fn lineups_for_team(&self, team_id: u32) -> StoreResult<Vec<Lineup>> {
        let rows = sqlx::query("SELECT * FROM lineups WHERE team_id = ? ORDER BY date DESC")
            .bind(team_id as i64)
            .fetch_all(self.pool())
            .await?;
        self.assemble_lineups(rows).await
    }

    /// Upcoming lineups, soonest first; used by the member view.
    pub async fn upcoming_lineups(
        &self,
        team_id: u32,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Lineup>> {
        let rows = sqlx::query(
            "SELECT * FROM lineups WHERE team_id = ? AND date >= ? ORDER BY date",
        )
        .bind(team_id as i64)
        .bind(now)
        .fetch_all(self.pool())
        .await?;
        self.assemble_lineups(rows).await
    }

    /// Upcoming public lineups for the public team page.
    pub async fn public_upcoming_lineups(
        &self,
        team_id: u32,
        now: DateTime<Utc>,
        limit: u32,
    ) -> StoreResult<Vec<Lineup>> {
        let rows = sqlx::query(
            "SELECT * FROM lineups \
             WHERE team_id = ? AND is_public = 1 AND date >= ? ORDER BY date LIMIT ?",
        )
        .bind(team_id as i64)
        .bind(now)
        .bind(limit as i64)
        .fetch_all(self.pool())
        .await?;
        self.assemble_lineups(rows).await
    }

    async fn lineup_player_ids(&self, lineup_id: u32) -> StoreResult<Vec<u32>> {
        let rows = sqlx::query("SELECT user_id FROM lineup_players WHERE lineup_id = ?")
            .bind(lineup_id as i64)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(|r| id_u32(r.get("user_id"))).collect())
    }

    async fn assemble_lineups(&self, rows: Vec<SqliteRow>) -> StoreResult<Vec<Lineup>> {
        let mut lineups: Vec<Lineup> = rows.iter().map(map_lineup).collect();
        for lineup in &mut lineups {
            lineup.player_ids = self.lineup_player_ids(lineup.id).await?;
        }
        Ok(lineups)
    }
}
