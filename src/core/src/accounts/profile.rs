use chrono::NaiveDate;

/// Player pass. One per user, pass numbers are globally unique.
#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub id: u32,
    pub user_id: u32,
    pub pass_number: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub club_id: Option<u32>,
}

/// Referee license. License level is free text, e.g. "Regional".
#[derive(Debug, Clone)]
pub struct RefereeProfile {
    pub id: u32,
    pub user_id: u32,
    pub license_number: String,
    pub license_level: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub federation_id: Option<u32>,
}

/// Timekeeper / match secretary qualification.
#[derive(Debug, Clone)]
pub struct TimekeeperProfile {
    pub id: u32,
    pub user_id: u32,
    pub license_number: String,
    pub qualification: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub federation_id: Option<u32>,
}
