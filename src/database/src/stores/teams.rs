use crate::rows::{id_u32, opt_id_u32, parse_role};
use crate::stores::users::map_user;
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{RosterMember, Team, User, short_code, slugify};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::collections::HashMap;

fn map_team(row: &SqliteRow) -> Team {
    Team {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        club_id: id_u32(row.get("club_id")),
        age_group_id: opt_id_u32(row.get("age_group_id")),
        sport_id: opt_id_u32(row.get("sport_id")),
        player_ids: Vec::new(),
        trainer_ids: Vec::new(),
        cashier_id: opt_id_u32(row.get("cashier_id")),
        short_code: row.get("short_code"),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Field set for team create/edit. Roster membership is replaced
/// wholesale on every write, matching the form semantics.
pub struct TeamFields {
    pub name: String,
    pub club_id: u32,
    pub age_group_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub player_ids: Vec<u32>,
    pub trainer_ids: Vec<u32>,
    pub cashier_id: Option<u32>,
    pub short_code: Option<String>,
    pub additional_info: Option<String>,
}

impl Storage {
    pub async fn create_team(&self, fields: TeamFields) -> StoreResult<Team> {
        let slug = slugify(&fields.name);
        let code = fields.short_code.clone().unwrap_or_else(short_code);
        let now = Utc::now();

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO teams \
             (name, slug, club_id, age_group_id, sport_id, cashier_id, short_code, \
              additional_info, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.club_id as i64)
        .bind(fields.age_group_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(fields.cashier_id.map(|id| id as i64))
        .bind(&code)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let team_id = result.last_insert_rowid();

        for user_id in &fields.player_ids {
            sqlx::query("INSERT OR IGNORE INTO team_players (team_id, user_id) VALUES (?, ?)")
                .bind(team_id)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }
        for user_id in &fields.trainer_ids {
            sqlx::query("INSERT OR IGNORE INTO team_trainers (team_id, user_id) VALUES (?, ?)")
                .bind(team_id)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.team_by_id(team_id as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_team(&self, id: u32, fields: TeamFields) -> StoreResult<Option<Team>> {
        let slug = slugify(&fields.name);

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "UPDATE teams SET name = ?, slug = ?, club_id = ?, age_group_id = ?, sport_id = ?, \
             cashier_id = ?, short_code = COALESCE(?, short_code), additional_info = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.club_id as i64)
        .bind(fields.age_group_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(fields.cashier_id.map(|id| id as i64))
        .bind(&fields.short_code)
        .bind(&fields.additional_info)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM team_players WHERE team_id = ?")
            .bind(id as i64)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM team_trainers WHERE team_id = ?")
            .bind(id as i64)
            .execute(&mut *tx)
            .await?;

        for user_id in &fields.player_ids {
            sqlx::query("INSERT OR IGNORE INTO team_players (team_id, user_id) VALUES (?, ?)")
                .bind(id as i64)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }
        for user_id in &fields.trainer_ids {
            sqlx::query("INSERT OR IGNORE INTO team_trainers (team_id, user_id) VALUES (?, ?)")
                .bind(id as i64)
                .bind(*user_id as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.team_by_id(id).await
    }

    pub async fn team_by_id(&self, id: u32) -> StoreResult<Option<Team>> {
        let row = sqlx::query("SELECT * FROM teams WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => {
                let mut team = map_team(&row);
                self.load_roster(&mut team).await?;
                Ok(Some(team))
            }
            None => Ok(None),
        }
    }

    pub async fn team_by_slug(&self, slug: &str) -> StoreResult<Option<Team>> {
        let row = sqlx::query("SELECT * FROM teams WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => {
                let mut team = map_team(&row);
                self.load_roster(&mut team).await?;
                Ok(Some(team))
            }
            None => Ok(None),
        }
    }

    pub async fn teams(&self) -> StoreResult<Vec<Team>> {
        let rows = sqlx::query("SELECT * FROM teams ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        self.assemble_teams(rows).await
    }

    pub async fn latest_teams(&self, limit: u32) -> StoreResult<Vec<Team>> {
        let rows = sqlx::query("SELECT * FROM teams ORDER BY created_at DESC, id DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(self.pool())
            .await?;
        self.assemble_teams(rows).await
    }

    /// Teams where the user is on the player roster.
    pub async fn teams_for_player(&self, user_id: u32) -> StoreResult<Vec<Team>> {
        let rows = sqlx::query(
            "SELECT t.* FROM teams t \
             JOIN team_players tp ON tp.team_id = t.id \
             WHERE tp.user_id = ? ORDER BY t.name",
        )
        .bind(user_id as i64)
        .fetch_all(self.pool())
        .await?;
        self.assemble_teams(rows).await
    }

    pub async fn teams_by_sport_name(&self, sport_name: &str) -> StoreResult<Vec<Team>> {
        let rows = sqlx::query(
            "SELECT t.* FROM teams t \
             JOIN sports s ON t.sport_id = s.id \
             JOIN clubs c ON t.club_id = c.id \
             WHERE lower(s.name) = lower(?) \
             ORDER BY c.name, t.name",
        )
        .bind(sport_name)
        .fetch_all(self.pool())
        .await?;
        self.assemble_teams(rows).await
    }

    pub async fn search_teams(&self, query: &str) -> StoreResult<Vec<Team>> {
        let pattern = format!("%{}%", query);
        let rows = sqlx::query(
            "SELECT DISTINCT t.* FROM teams t \
             JOIN clubs c ON t.club_id = c.id \
             LEFT JOIN sports s ON t.sport_id = s.id \
             LEFT JOIN age_groups a ON t.age_group_id = a.id \
             WHERE t.name LIKE ? OR c.name LIKE ? OR s.name LIKE ? OR a.name LIKE ? \
             ORDER BY t.name",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;
        self.assemble_teams(rows).await
    }

    /// Users on the player roster, for the members listing.
    pub async fn team_member_users(&self, team_id: u32) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT u.* FROM users u \
             JOIN team_players tp ON tp.user_id = u.id \
             WHERE tp.team_id = ? ORDER BY u.username",
        )
        .bind(team_id as i64)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(|r| map_user(r)).collect())
    }

    /// Resolved role/pass view of the given users, for roster validation.
    pub async fn roster_members(&self, user_ids: &[u32]) -> StoreResult<Vec<RosterMember>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let sql = format!(
            "SELECT u.id, u.username, u.role, \
             EXISTS(SELECT 1 FROM player_profiles p WHERE p.user_id = u.id) AS has_pass \
             FROM users u WHERE u.id IN ({})",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in user_ids {
            query = query.bind(*id as i64);
        }

        let rows = query.fetch_all(self.pool()).await?;
        Ok(rows
            .iter()
            .map(|row| RosterMember {
                user_id: id_u32(row.get("id")),
                username: row.get("username"),
                role: parse_role(row.get("role")),
                has_player_pass: row.get::<bool, _>("has_pass"),
            })
            .collect())
    }

    async fn load_roster(&self, team: &mut Team) -> StoreResult<()> {
        let players = sqlx::query("SELECT user_id FROM team_players WHERE team_id = ?")
            .bind(team.id as i64)
            .fetch_all(self.pool())
            .await?;
        let trainers = sqlx::query("SELECT user_id FROM team_trainers WHERE team_id = ?")
            .bind(team.id as i64)
            .fetch_all(self.pool())
            .await?;

        team.player_ids = players.iter().map(|r| id_u32(r.get("user_id"))).collect();
        team.trainer_ids = trainers.iter().map(|r| id_u32(r.get("user_id"))).collect();
        Ok(())
    }

    /// Maps team rows and fills every roster with two grouped queries
    /// instead of two per team.
    async fn assemble_teams(&self, rows: Vec<SqliteRow>) -> StoreResult<Vec<Team>> {
        let mut teams: Vec<Team> = rows.iter().map(map_team).collect();
        if teams.is_empty() {
            return Ok(teams);
        }

        let mut players: HashMap<u32, Vec<u32>> = HashMap::new();
        let mut trainers: HashMap<u32, Vec<u32>> = HashMap::new();

        let player_rows = sqlx::query("SELECT team_id, user_id FROM team_players")
            .fetch_all(self.pool())
            .await?;
        for row in &player_rows {
            players
                .entry(id_u32(row.get("team_id")))
                .or_default()
                .push(id_u32(row.get("user_id")));
        }

        let trainer_rows = sqlx::query("SELECT team_id, user_id FROM team_trainers")
            .fetch_all(self.pool())
            .await?;
        for row in &trainer_rows {
            trainers
                .entry(id_u32(row.get("team_id")))
                .or_default()
                .push(id_u32(row.get("user_id")));
        }

        for team in &mut teams {
            if let Some(ids) = players.remove(&team.id) {
                team.player_ids = ids;
            }
            if let Some(ids) = trainers.remove(&team.id) {
                team.trainer_ids = ids;
            }
        }

        Ok(teams)
    }
}
