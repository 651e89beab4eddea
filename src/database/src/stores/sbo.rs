use crate::rows::{id_u32, opt_id_u32, parse_event_type, parse_json};
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{SboEvent, SboEventType, SboGame};
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_game(row: &SqliteRow) -> SboGame {
    SboGame {
        id: id_u32(row.get("id")),
        fixture_id: id_u32(row.get("fixture_id")),
        start_time: row.get("start_time"),
        score_home: row.get("score_home"),
        score_away: row.get("score_away"),
        time_elapsed: row.get("time_elapsed"),
        is_running: row.get("is_running"),
        resumed_at: row.get("resumed_at"),
        slug: row.get("slug"),
        short_code: row.get("short_code"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_event(row: &SqliteRow) -> SboEvent {
    SboEvent {
        id: id_u32(row.get("id")),
        game_id: id_u32(row.get("game_id")),
        timestamp: row.get("timestamp"),
        event_type: parse_event_type(row.get("event_type")),
        team_id: opt_id_u32(row.get("team_id")),
        player_id: opt_id_u32(row.get("player_id")),
        meta: parse_json(row.get("meta")),
        description: row.get("description"),
    }
}

pub struct NewSboEvent {
    pub event_type: SboEventType,
    pub team_id: Option<u32>,
    pub player_id: Option<u32>,
    pub meta: Value,
    pub description: String,
}

impl Storage {
    /// Opens the scoreboard for a fixture. The UNIQUE fixture column
    /// turns a second open into a conflict.
    pub async fn create_sbo_game(
        &self,
        fixture_id: u32,
        slug: &str,
        code: &str,
    ) -> StoreResult<SboGame> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO sbo_games (fixture_id, slug, short_code, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(fixture_id as i64)
        .bind(slug)
        .bind(code)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.sbo_game_by_id(result.last_insert_rowid() as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn sbo_game_by_id(&self, id: u32) -> StoreResult<Option<SboGame>> {
        let row = sqlx::query("SELECT * FROM sbo_games WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_game))
    }

    pub async fn sbo_game_by_fixture(&self, fixture_id: u32) -> StoreResult<Option<SboGame>> {
        let row = sqlx::query("SELECT * FROM sbo_games WHERE fixture_id = ?")
            .bind(fixture_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_game))
    }

    /// Persists clock and score state after a core-side mutation.
    pub async fn save_sbo_game(&self, game: &SboGame) -> StoreResult<()> {
        sqlx::query(
            "UPDATE sbo_games SET start_time = ?, score_home = ?, score_away = ?, \
             time_elapsed = ?, is_running = ?, resumed_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(game.start_time)
        .bind(game.score_home)
        .bind(game.score_away)
        .bind(game.time_elapsed)
        .bind(game.is_running)
        .bind(game.resumed_at)
        .bind(Utc::now())
        .bind(game.id as i64)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn add_sbo_event(&self, game_id: u32, new: NewSboEvent) -> StoreResult<SboEvent> {
        let timestamp = Utc::now();
        let meta =
            serde_json::to_string(&new.meta).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let result = sqlx::query(
            "INSERT INTO sbo_events \
             (game_id, timestamp, event_type, team_id, player_id, meta, description) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(game_id as i64)
        .bind(timestamp)
        .bind(new.event_type.as_str())
        .bind(new.team_id.map(|id| id as i64))
        .bind(new.player_id.map(|id| id as i64))
        .bind(&meta)
        .bind(&new.description)
        .execute(self.pool())
        .await?;

        Ok(SboEvent {
            id: result.last_insert_rowid() as u32,
            game_id,
            timestamp,
            event_type: new.event_type,
            team_id: new.team_id,
            player_id: new.player_id,
            meta: new.meta,
            description: new.description,
        })
    }

    /// Event log of a game, oldest first.
    pub async fn sbo_events_for_game(&self, game_id: u32) -> StoreResult<Vec<SboEvent>> {
        let rows = sqlx::query(
            "SELECT * FROM sbo_events WHERE game_id = ? ORDER BY timestamp, id",
        )
        .bind(game_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_event).collect())
    }
}
