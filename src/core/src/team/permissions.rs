use crate::accounts::User;
use crate::team::Team;

/// Trainer rights: roster trainers, plus the administrative roles.
pub fn is_trainer(user: &User, team: &Team) -> bool {
    team.has_trainer(user.id) || user.role.is_admin()
}

/// Roster player, no admin override.
pub fn is_player(user: &User, team: &Team) -> bool {
    team.has_player(user.id)
}

/// Member = player or trainer; gates chat, RSVP and the member view.
pub fn is_member(user: &User, team: &Team) -> bool {
    is_player(user, team) || is_trainer(user, team)
}

/// The cashier manages the penalty ledger. Strictly the designated user,
/// admins do not inherit this.
pub fn is_cashier(user: &User, team: &Team) -> bool {
    team.cashier_id == Some(user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::UserRole;
    use chrono::Utc;

    fn user(id: u32, role: UserRole) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.org", id),
            password_hash: String::new(),
            role,
            short_id: format!("{:010x}", id),
            club_id: None,
            federation_id: None,
            created_at: Utc::now(),
        }
    }

    fn team() -> Team {
        Team {
            id: 1,
            name: "First".to_string(),
            slug: "first".to_string(),
            club_id: 1,
            age_group_id: None,
            sport_id: None,
            player_ids: vec![10, 11],
            trainer_ids: vec![20],
            cashier_id: Some(11),
            short_code: "A1B2C3".to_string(),
            additional_info: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_trainer_by_roster() {
        assert!(is_trainer(&user(20, UserRole::Coach), &team()));
        assert!(!is_trainer(&user(10, UserRole::Player), &team()));
    }

    #[test]
    fn test_trainer_by_admin_override() {
        assert!(is_trainer(&user(99, UserRole::ClubAdmin), &team()));
        assert!(is_trainer(&user(99, UserRole::FederationAdmin), &team()));
        assert!(is_trainer(&user(99, UserRole::GlobalAdmin), &team()));
        assert!(!is_trainer(&user(99, UserRole::Referee), &team()));
    }

    #[test]
    fn test_member_is_player_or_trainer() {
        assert!(is_member(&user(10, UserRole::Player), &team()));
        assert!(is_member(&user(20, UserRole::Coach), &team()));
        assert!(!is_member(&user(30, UserRole::Player), &team()));
    }

    #[test]
    fn test_cashier_is_exact_designation() {
        assert!(is_cashier(&user(11, UserRole::Player), &team()));
        assert!(!is_cashier(&user(10, UserRole::Player), &team()));
        // no admin override for the ledger
        assert!(!is_cashier(&user(99, UserRole::GlobalAdmin), &team()));
    }
}
