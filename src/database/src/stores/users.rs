use crate::rows::{id_u32, opt_id_u32, parse_role};
use crate::{StoreResult, Storage};
use chrono::{NaiveDate, Utc};
use sportdesk_core::{PlayerProfile, RefereeProfile, TimekeeperProfile, User, UserRole};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

pub(crate) fn map_user(row: &SqliteRow) -> User {
    User {
        id: id_u32(row.get("id")),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: parse_role(row.get("role")),
        short_id: row.get("short_id"),
        club_id: opt_id_u32(row.get("club_id")),
        federation_id: opt_id_u32(row.get("federation_id")),
        created_at: row.get("created_at"),
    }
}

fn map_player_profile(row: &SqliteRow) -> PlayerProfile {
    PlayerProfile {
        id: id_u32(row.get("id")),
        user_id: id_u32(row.get("user_id")),
        pass_number: row.get("pass_number"),
        issue_date: row.get("issue_date"),
        expires_at: row.get("expires_at"),
        club_id: opt_id_u32(row.get("club_id")),
    }
}

fn map_referee_profile(row: &SqliteRow) -> RefereeProfile {
    RefereeProfile {
        id: id_u32(row.get("id")),
        user_id: id_u32(row.get("user_id")),
        license_number: row.get("license_number"),
        license_level: row.get("license_level"),
        issue_date: row.get("issue_date"),
        expires_at: row.get("expires_at"),
        federation_id: opt_id_u32(row.get("federation_id")),
    }
}

fn map_timekeeper_profile(row: &SqliteRow) -> TimekeeperProfile {
    TimekeeperProfile {
        id: id_u32(row.get("id")),
        user_id: id_u32(row.get("user_id")),
        license_number: row.get("license_number"),
        qualification: row.get("qualification"),
        issue_date: row.get("issue_date"),
        expires_at: row.get("expires_at"),
        federation_id: opt_id_u32(row.get("federation_id")),
    }
}

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub short_id: String,
}

pub struct NewProfileDates {
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
}

impl Storage {
    pub async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, role, short_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.role.as_str())
        .bind(&new.short_id)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(User {
            id: result.last_insert_rowid() as u32,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            short_id: new.short_id,
            club_id: None,
            federation_id: None,
            created_at,
        })
    }

    pub async fn user_by_id(&self, id: u32) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    pub async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    pub async fn user_by_short_id(&self, short_id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE short_id = ?")
            .bind(short_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    pub async fn create_player_profile(
        &self,
        user_id: u32,
        pass_number: &str,
        dates: NewProfileDates,
        club_id: Option<u32>,
    ) -> StoreResult<PlayerProfile> {
        let result = sqlx::query(
            "INSERT INTO player_profiles (user_id, pass_number, issue_date, expires_at, club_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id as i64)
        .bind(pass_number)
        .bind(dates.issue_date)
        .bind(dates.expires_at)
        .bind(club_id.map(|id| id as i64))
        .execute(self.pool())
        .await?;

        Ok(PlayerProfile {
            id: result.last_insert_rowid() as u32,
            user_id,
            pass_number: pass_number.to_string(),
            issue_date: dates.issue_date,
            expires_at: dates.expires_at,
            club_id,
        })
    }

    pub async fn player_profile_by_user(&self, user_id: u32) -> StoreResult<Option<PlayerProfile>> {
        let row = sqlx::query("SELECT * FROM player_profiles WHERE user_id = ?")
            .bind(user_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_player_profile))
    }

    pub async fn create_referee_profile(
        &self,
        user_id: u32,
        license_number: &str,
        license_level: &str,
        dates: NewProfileDates,
        federation_id: Option<u32>,
    ) -> StoreResult<RefereeProfile> {
        let result = sqlx::query(
            "INSERT INTO referee_profiles \
             (user_id, license_number, license_level, issue_date, expires_at, federation_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id as i64)
        .bind(license_number)
        .bind(license_level)
        .bind(dates.issue_date)
        .bind(dates.expires_at)
        .bind(federation_id.map(|id| id as i64))
        .execute(self.pool())
        .await?;

        Ok(RefereeProfile {
            id: result.last_insert_rowid() as u32,
            user_id,
            license_number: license_number.to_string(),
            license_level: license_level.to_string(),
            issue_date: dates.issue_date,
            expires_at: dates.expires_at,
            federation_id,
        })
    }

    pub async fn referee_profile_by_user(
        &self,
        user_id: u32,
    ) -> StoreResult<Option<RefereeProfile>> {
        let row = sqlx::query("SELECT * FROM referee_profiles WHERE user_id = ?")
            .bind(user_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_referee_profile))
    }

    pub async fn create_timekeeper_profile(
        &self,
        user_id: u32,
        license_number: &str,
        qualification: &str,
        dates: NewProfileDates,
        federation_id: Option<u32>,
    ) -> StoreResult<TimekeeperProfile> {
        let result = sqlx::query(
            "INSERT INTO timekeeper_profiles \
             (user_id, license_number, qualification, issue_date, expires_at, federation_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id as i64)
        .bind(license_number)
        .bind(qualification)
        .bind(dates.issue_date)
        .bind(dates.expires_at)
        .bind(federation_id.map(|id| id as i64))
        .execute(self.pool())
        .await?;

        Ok(TimekeeperProfile {
            id: result.last_insert_rowid() as u32,
            user_id,
            license_number: license_number.to_string(),
            qualification: qualification.to_string(),
            issue_date: dates.issue_date,
            expires_at: dates.expires_at,
            federation_id,
        })
    }

    pub async fn timekeeper_profile_by_user(
        &self,
        user_id: u32,
    ) -> StoreResult<Option<TimekeeperProfile>> {
        let row = sqlx::query("SELECT * FROM timekeeper_profiles WHERE user_id = ?")
            .bind(user_id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_timekeeper_profile))
    }
}
