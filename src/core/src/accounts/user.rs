use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Global account role. Team-level rights (trainer, cashier) are derived
/// from team relations instead, see `crate::team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Player,
    Referee,
    Timekeeper,
    Coach,
    ClubAdmin,
    FederationAdmin,
    GlobalAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::Referee => "referee",
            UserRole::Timekeeper => "timekeeper",
            UserRole::Coach => "coach",
            UserRole::ClubAdmin => "club_admin",
            UserRole::FederationAdmin => "federation_admin",
            UserRole::GlobalAdmin => "global_admin",
        }
    }

    pub fn from_str_name(value: &str) -> Option<UserRole> {
        match value {
            "player" => Some(UserRole::Player),
            "referee" => Some(UserRole::Referee),
            "timekeeper" => Some(UserRole::Timekeeper),
            "coach" => Some(UserRole::Coach),
            "club_admin" => Some(UserRole::ClubAdmin),
            "federation_admin" => Some(UserRole::FederationAdmin),
            "global_admin" => Some(UserRole::GlobalAdmin),
            _ => None,
        }
    }

    /// Administrative roles override team-level membership checks.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            UserRole::ClubAdmin | UserRole::FederationAdmin | UserRole::GlobalAdmin
        )
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Player
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// 10-char hex handle, generated once at first persist.
    pub short_id: String,
    pub club_id: Option<u32>,
    pub federation_id: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Player,
            UserRole::Referee,
            UserRole::Timekeeper,
            UserRole::Coach,
            UserRole::ClubAdmin,
            UserRole::FederationAdmin,
            UserRole::GlobalAdmin,
        ] {
            assert_eq!(UserRole::from_str_name(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str_name("groundskeeper"), None);
    }

    #[test]
    fn test_admin_roles() {
        assert!(UserRole::ClubAdmin.is_admin());
        assert!(UserRole::FederationAdmin.is_admin());
        assert!(UserRole::GlobalAdmin.is_admin());
        assert!(!UserRole::Player.is_admin());
        assert!(!UserRole::Coach.is_admin());
    }
}
