use chrono::{DateTime, Utc};

/// A team is the membership unit: roster players, trainers and the
/// cashier designation all hang off it, while the club provides the
/// organizational home.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub club_id: u32,
    pub age_group_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub player_ids: Vec<u32>,
    pub trainer_ids: Vec<u32>,
    pub cashier_id: Option<u32>,
    pub short_code: String,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn has_player(&self, user_id: u32) -> bool {
        self.player_ids.contains(&user_id)
    }

    pub fn has_trainer(&self, user_id: u32) -> bool {
        self.trainer_ids.contains(&user_id)
    }
}
