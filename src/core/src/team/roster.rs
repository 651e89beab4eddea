use crate::accounts::UserRole;
use std::fmt;

/// Resolved view of a would-be roster player, as loaded from storage at
/// validation time.
#[derive(Debug, Clone)]
pub struct RosterMember {
    pub user_id: u32,
    pub username: String,
    pub role: UserRole,
    pub has_player_pass: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The user does not hold the `player` role.
    NotAPlayer { username: String },
    /// The user has no player-pass profile.
    MissingPlayerPass { username: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::NotAPlayer { username } => {
                write!(f, "{} is not a player", username)
            }
            RosterError::MissingPlayerPass { username } => {
                write!(f, "{} has no valid player pass", username)
            }
        }
    }
}

impl std::error::Error for RosterError {}

/// Every roster player must hold role `player` and own a player pass.
/// The first violation is reported; membership edits that introduce one
/// are rejected as a whole.
pub fn validate_roster(members: &[RosterMember]) -> Result<(), RosterError> {
    for member in members {
        if member.role != UserRole::Player {
            return Err(RosterError::NotAPlayer {
                username: member.username.clone(),
            });
        }
        if !member.has_player_pass {
            return Err(RosterError::MissingPlayerPass {
                username: member.username.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(username: &str, role: UserRole, has_pass: bool) -> RosterMember {
        RosterMember {
            user_id: 1,
            username: username.to_string(),
            role,
            has_player_pass: has_pass,
        }
    }

    #[test]
    fn test_valid_roster() {
        let members = vec![
            member("anna", UserRole::Player, true),
            member("ben", UserRole::Player, true),
        ];
        assert!(validate_roster(&members).is_ok());
    }

    #[test]
    fn test_rejects_wrong_role() {
        let members = vec![
            member("anna", UserRole::Player, true),
            member("carl", UserRole::Coach, true),
        ];
        assert_eq!(
            validate_roster(&members),
            Err(RosterError::NotAPlayer {
                username: "carl".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_missing_pass() {
        let members = vec![member("dora", UserRole::Player, false)];
        assert_eq!(
            validate_roster(&members),
            Err(RosterError::MissingPlayerPass {
                username: "dora".to_string()
            })
        );
    }

    #[test]
    fn test_empty_roster_is_fine() {
        assert!(validate_roster(&[]).is_ok());
    }
}
