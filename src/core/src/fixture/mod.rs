use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Scheduled,
    Ongoing,
    Finished,
    Canceled,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureStatus::Scheduled => "scheduled",
            FixtureStatus::Ongoing => "ongoing",
            FixtureStatus::Finished => "finished",
            FixtureStatus::Canceled => "canceled",
        }
    }

    pub fn from_str_name(value: &str) -> Option<FixtureStatus> {
        match value {
            "scheduled" => Some(FixtureStatus::Scheduled),
            "ongoing" => Some(FixtureStatus::Ongoing),
            "finished" => Some(FixtureStatus::Finished),
            "canceled" => Some(FixtureStatus::Canceled),
            _ => None,
        }
    }
}

impl Default for FixtureStatus {
    fn default() -> Self {
        FixtureStatus::Scheduled
    }
}

/// A scheduled game between two teams. Referee assignment is a single
/// user link; `referee_preference_ids` is the free wish list it is
/// usually picked from.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub id: u32,
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
    pub referee_preference_ids: Vec<u32>,
    pub slug: String,
    pub short_code: String,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.kickoff < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trip() {
        for status in [
            FixtureStatus::Scheduled,
            FixtureStatus::Ongoing,
            FixtureStatus::Finished,
            FixtureStatus::Canceled,
        ] {
            assert_eq!(FixtureStatus::from_str_name(status.as_str()), Some(status));
        }
        assert_eq!(FixtureStatus::from_str_name("postponed"), None);
    }

    #[test]
    fn test_is_past() {
        let kickoff = Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap();
        let fixture = Fixture {
            id: 1,
            home_team_id: 1,
            away_team_id: 2,
            venue_id: None,
            kickoff,
            competition: String::new(),
            round: String::new(),
            referee_id: None,
            status: FixtureStatus::default(),
            result_home: None,
            result_away: None,
            referee_preference_ids: Vec::new(),
            slug: "a-vs-b".to_string(),
            short_code: "AB12CD".to_string(),
            additional_info: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(fixture.is_past(kickoff + chrono::Duration::hours(3)));
        assert!(!fixture.is_past(kickoff - chrono::Duration::hours(3)));
    }
}
