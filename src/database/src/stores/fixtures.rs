use crate::rows::{id_u32, opt_id_u32, parse_fixture_status};
use crate::{StoreResult, Storage};
use chrono::{DateTime, Utc};
use sportdesk_core::{Fixture, FixtureStatus, short_code, slugify};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_fixture(row: &SqliteRow) -> Fixture {
    Fixture {
        id: id_u32(row.get("id")),
        home_team_id: id_u32(row.get("home_team_id")),
        away_team_id: id_u32(row.get("away_team_id")),
        venue_id: opt_id_u32(row.get("venue_id")),
        kickoff: row.get("kickoff"),
        competition: row.get("competition"),
        round: row.get("round"),
        referee_id: opt_id_u32(row.get("referee_id")),
        status: parse_fixture_status(row.get("status")),
        result_home: row.get("result_home"),
        result_away: row.get("result_away"),
        referee_preference_ids: Vec::new(),
        slug: row.get("slug"),
        short_code: row.get("short_code"),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub struct FixtureFields {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub venue_id: Option<u32>,
    pub kickoff: DateTime<Utc>,
    pub competition: String,
    pub round: String,
    pub referee_id: Option<u32>,
    pub status: FixtureStatus,
    pub result_home: Option<i32>,
    pub result_away: Option<i32>,
    pub additional_info: Option<String>,
}

impl Storage {
    /// Creates a fixture. The slug is derived from the team names plus
    /// the kickoff date so repeated pairings stay unique.
    pub async fn create_fixture(
        &self,
        home_name: &str,
        away_name: &str,
        fields: FixtureFields,
    ) -> StoreResult<Fixture> {
        let slug = slugify(&format!(
            "{} vs {} {}",
            home_name,
            away_name,
            fields.kickoff.format("%Y-%m-%d")
        ));
        let code = short_code();
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO fixtures \
             (home_team_id, away_team_id, venue_id, kickoff, competition, round, referee_id, \
              status, result_home, result_away, slug, short_code, additional_info, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(fields.home_team_id as i64)
        .bind(fields.away_team_id as i64)
        .bind(fields.venue_id.map(|id| id as i64))
        .bind(fields.kickoff)
        .bind(&fields.competition)
        .bind(&fields.round)
        .bind(fields.referee_id.map(|id| id as i64))
        .bind(fields.status.as_str())
        .bind(fields.result_home)
        .bind(fields.result_away)
        .bind(&slug)
        .bind(&code)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.fixture_by_id(result.last_insert_rowid() as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_fixture(
        &self,
        id: u32,
        fields: FixtureFields,
    ) -> StoreResult<Option<Fixture>> {
        let result = sqlx::query(
            "UPDATE fixtures SET home_team_id = ?, away_team_id = ?, venue_id = ?, kickoff = ?, \
             competition = ?, round = ?, referee_id = ?, status = ?, result_home = ?, \
             result_away = ?, additional_info = ?, updated_at = ? WHERE id = ?",
        )
        .bind(fields.home_team_id as i64)
        .bind(fields.away_team_id as i64)
        .bind(fields.venue_id.map(|id| id as i64))
        .bind(fields.kickoff)
        .bind(&fields.competition)
        .bind(&fields.round)
        .bind(fields.referee_id.map(|id| id as i64))
        .bind(fields.status.as_str())
        .bind(fields.result_home)
        .bind(fields.result_away)
        .bind(&fields.additional_info)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fixture_by_id(id).await
    }

    pub async fn fixture_by_id(&self, id: u32) -> StoreResult<Option<Fixture>> {
        let row = sqlx::query("SELECT * FROM fixtures WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        self.finish_fixture(row).await
    }

    pub async fn fixture_by_slug(&self, slug: &str) -> StoreResult<Option<Fixture>> {
        let row = sqlx::query("SELECT * FROM fixtures WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        self.finish_fixture(row).await
    }

    pub async fn fixtures(&self) -> StoreResult<Vec<Fixture>> {
        let rows = sqlx::query("SELECT * FROM fixtures ORDER BY kickoff")
            .fetch_all(self.pool())
            .await?;

        let mut fixtures = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut fixture = map_fixture(row);
            fixture.referee_preference_ids = self.preference_ids(fixture.id).await?;
            fixtures.push(fixture);
        }
        Ok(fixtures)
    }

    /// Upcoming fixtures involving a team, soonest first.
    pub async fn upcoming_fixtures_for_team(
        &self,
        team_id: u32,
        now: DateTime<Utc>,
        limit: u32,
    ) -> StoreResult<Vec<Fixture>> {
        let rows = sqlx::query(
            "SELECT * FROM fixtures \
             WHERE (home_team_id = ? OR away_team_id = ?) AND kickoff >= ? \
             ORDER BY kickoff LIMIT ?",
        )
        .bind(team_id as i64)
        .bind(team_id as i64)
        .bind(now)
        .bind(limit as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_fixture).collect())
    }

    pub async fn set_fixture_referee(
        &self,
        fixture_id: u32,
        referee_id: Option<u32>,
    ) -> StoreResult<Option<Fixture>> {
        let result = sqlx::query("UPDATE fixtures SET referee_id = ?, updated_at = ? WHERE id = ?")
            .bind(referee_id.map(|id| id as i64))
            .bind(Utc::now())
            .bind(fixture_id as i64)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fixture_by_id(fixture_id).await
    }

    pub async fn add_referee_preference(
        &self,
        fixture_id: u32,
        user_id: u32,
    ) -> StoreResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO fixture_referee_preferences (fixture_id, user_id) \
             VALUES (?, ?)",
        )
        .bind(fixture_id as i64)
        .bind(user_id as i64)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn preference_ids(&self, fixture_id: u32) -> StoreResult<Vec<u32>> {
        let rows = sqlx::query(
            "SELECT user_id FROM fixture_referee_preferences WHERE fixture_id = ?",
        )
        .bind(fixture_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(|r| id_u32(r.get("user_id"))).collect())
    }

    async fn finish_fixture(&self, row: Option<SqliteRow>) -> StoreResult<Option<Fixture>> {
        match row {
            Some(row) => {
                let mut fixture = map_fixture(&row);
                fixture.referee_preference_ids = self.preference_ids(fixture.id).await?;
                Ok(Some(fixture))
            }
            None => Ok(None),
        }
    }
}
