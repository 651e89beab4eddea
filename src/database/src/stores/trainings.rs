use crate::rows::{id_u32, opt_id_u32, parse_rsvp_status};
use crate::{StoreResult, Storage};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use sportdesk_core::{RsvpStatus, TrainingEvent, TrainingRsvp, TrainingSeries, expansion_dates};
use log::info;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::collections::{HashMap, HashSet};

fn map_series(row: &SqliteRow) -> TrainingSeries {
    let weekday_num: i64 = row.get("weekday");
    TrainingSeries {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        weekday: Weekday::try_from(weekday_num as u8).unwrap_or(Weekday::Mon),
        time: row.get("time"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_by: opt_id_u32(row.get("created_by")),
        created_at: row.get("created_at"),
    }
}

fn map_event(row: &SqliteRow) -> TrainingEvent {
    TrainingEvent {
        id: id_u32(row.get("id")),
        team_id: id_u32(row.get("team_id")),
        start: row.get("start"),
        location: row.get("location"),
        note: row.get("note"),
        created_by: opt_id_u32(row.get("created_by")),
        series_id: opt_id_u32(row.get("series_id")),
        created_at: row.get("created_at"),
    }
}

fn map_rsvp(row: &SqliteRow) -> TrainingRsvp {
    TrainingRsvp {
        id: id_u32(row.get("id")),
        training_id: id_u32(row.get("training_id")),
        user_id: id_u32(row.get("user_id")),
        status: parse_rsvp_status(row.get("status")),
        comment: row.get("comment"),
        updated_at: row.get("updated_at"),
    }
}

pub struct SeriesFields {
    pub weekday: Weekday,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub struct EventFields {
    pub start: NaiveDateTime,
    pub location: String,
    pub note: String,
}

impl Storage {
    pub async fn create_training_series(
        &self,
        team_id: u32,
        created_by: u32,
        fields: SeriesFields,
    ) -> StoreResult<TrainingSeries> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO training_series \
             (team_id, weekday, time, start_date, end_date, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(team_id as i64)
        .bind(fields.weekday.num_days_from_monday() as i64)
        .bind(fields.time)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(created_by as i64)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(TrainingSeries {
            id: result.last_insert_rowid() as u32,
            team_id,
            weekday: fields.weekday,
            time: fields.time,
            start_date: fields.start_date,
            end_date: fields.end_date,
            created_by: Some(created_by),
            created_at,
        })
    }

    pub async fn training_series_for_team(&self, team_id: u32) -> StoreResult<Vec<TrainingSeries>> {
        let rows = sqlx::query(
            "SELECT * FROM training_series WHERE team_id = ? ORDER BY created_at DESC",
        )
        .bind(team_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_series).collect())
    }

    /// Expands a series into concrete events, skipping dates the team
    /// calendar already has at that exact timestamp. Safe to re-run.
    /// Returns the number of events created.
    pub async fn generate_series_events(&self, series: &TrainingSeries) -> StoreResult<u32> {
        let existing_rows = sqlx::query("SELECT start FROM training_events WHERE team_id = ?")
            .bind(series.team_id as i64)
            .fetch_all(self.pool())
            .await?;
        let existing: HashSet<NaiveDateTime> =
            existing_rows.iter().map(|r| r.get("start")).collect();

        let dates = expansion_dates(series, &existing);

        let mut created = 0;
        let mut tx = self.pool().begin().await?;
        for start in &dates {
            // the UNIQUE (team_id, start) index backs up the in-memory skip
            let result = sqlx::query(
                "INSERT OR IGNORE INTO training_events \
                 (team_id, start, created_by, series_id, created_at) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(series.team_id as i64)
            .bind(start)
            .bind(series.created_by.map(|id| id as i64))
            .bind(series.id as i64)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
            created += result.rows_affected() as u32;
        }
        tx.commit().await?;

        info!(
            "training series {} expanded: {} events created",
            series.id, created
        );
        Ok(created)
    }

    pub async fn create_training_event(
        &self,
        team_id: u32,
        created_by: u32,
        fields: EventFields,
    ) -> StoreResult<TrainingEvent> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO training_events \
             (team_id, start, location, note, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(team_id as i64)
        .bind(fields.start)
        .bind(&fields.location)
        .bind(&fields.note)
        .bind(created_by as i64)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(TrainingEvent {
            id: result.last_insert_rowid() as u32,
            team_id,
            start: fields.start,
            location: fields.location,
            note: fields.note,
            created_by: Some(created_by),
            series_id: None,
            created_at,
        })
    }

    pub async fn training_event_by_id(
        &self,
        team_id: u32,
        event_id: u32,
    ) -> StoreResult<Option<TrainingEvent>> {
        let row = sqlx::query("SELECT * FROM training_events WHERE id = ? AND team_id = ?")
            .bind(event_id as i64)
            .bind(team_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_event))
    }

    pub async fn trainings_for_team(&self, team_id: u32) -> StoreResult<Vec<TrainingEvent>> {
        let rows = sqlx::query("SELECT * FROM training_events WHERE team_id = ? ORDER BY start")
            .bind(team_id as i64)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_event).collect())
    }

    pub async fn upcoming_trainings(
        &self,
        team_id: u32,
        now: NaiveDateTime,
    ) -> StoreResult<Vec<TrainingEvent>> {
        let rows = sqlx::query(
            "SELECT * FROM training_events WHERE team_id = ? AND start >= ? ORDER BY start",
        )
        .bind(team_id as i64)
        .bind(now)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_event).collect())
    }

    pub async fn delete_training_event(&self, team_id: u32, event_id: u32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM training_events WHERE id = ? AND team_id = ?")
            .bind(event_id as i64)
            .bind(team_id as i64)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Creates or replaces the (event, user) response.
    pub async fn upsert_rsvp(
        &self,
        training_id: u32,
        user_id: u32,
        status: RsvpStatus,
        comment: Option<String>,
    ) -> StoreResult<TrainingRsvp> {
        let updated_at = Utc::now();
        sqlx::query(
            "INSERT INTO training_rsvps (training_id, user_id, status, comment, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (training_id, user_id) \
             DO UPDATE SET status = excluded.status, comment = excluded.comment, \
             updated_at = excluded.updated_at",
        )
        .bind(training_id as i64)
        .bind(user_id as i64)
        .bind(status.as_str())
        .bind(&comment)
        .bind(updated_at)
        .execute(self.pool())
        .await?;

        let row = sqlx::query(
            "SELECT * FROM training_rsvps WHERE training_id = ? AND user_id = ?",
        )
        .bind(training_id as i64)
        .bind(user_id as i64)
        .fetch_one(self.pool())
        .await?;
        Ok(map_rsvp(&row))
    }

    /// The caller's responses for a team's events, keyed by event id.
    pub async fn user_rsvps_for_team(
        &self,
        team_id: u32,
        user_id: u32,
    ) -> StoreResult<HashMap<u32, TrainingRsvp>> {
        let rows = sqlx::query(
            "SELECT r.* FROM training_rsvps r \
             JOIN training_events e ON e.id = r.training_id \
             WHERE e.team_id = ? AND r.user_id = ?",
        )
        .bind(team_id as i64)
        .bind(user_id as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .iter()
            .map(map_rsvp)
            .map(|rsvp| (rsvp.training_id, rsvp))
            .collect())
    }

    pub async fn rsvps_for_training(&self, training_id: u32) -> StoreResult<Vec<TrainingRsvp>> {
        let rows = sqlx::query(
            "SELECT * FROM training_rsvps WHERE training_id = ? ORDER BY updated_at",
        )
        .bind(training_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_rsvp).collect())
    }
}
