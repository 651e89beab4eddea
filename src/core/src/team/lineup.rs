use chrono::{DateTime, Utc};

/// A named player selection for an upcoming game. Public lineups show up
/// on the team's public page.
#[derive(Debug, Clone)]
pub struct Lineup {
    pub id: u32,
    pub team_id: u32,
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub player_ids: Vec<u32>,
    pub created_by: Option<u32>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Lineup players must come from the team roster; returns the ids that
/// are not on it.
pub fn players_outside_roster(player_ids: &[u32], roster: &[u32]) -> Vec<u32> {
    player_ids
        .iter()
        .copied()
        .filter(|id| !roster.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_outside_roster() {
        assert_eq!(players_outside_roster(&[1, 2, 5], &[1, 2, 3]), vec![5]);
        assert!(players_outside_roster(&[1, 2], &[1, 2, 5]).is_empty());
        assert!(players_outside_roster(&[], &[]).is_empty());
    }
}
