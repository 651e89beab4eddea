use crate::accounts::{User, UserRole};
use crate::fixture::Fixture;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Live scoreboard state for one fixture. One game per fixture.
///
/// The clock accumulates into `time_elapsed` whenever it is paused;
/// `resumed_at` carries the instant of the last start while running.
#[derive(Debug, Clone)]
pub struct SboGame {
    pub id: u32,
    pub fixture_id: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub score_home: i32,
    pub score_away: i32,
    pub time_elapsed: i64,
    pub is_running: bool,
    pub resumed_at: Option<DateTime<Utc>>,
    pub slug: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SboGame {
    /// Starts (or resumes) the clock. The first start stamps
    /// `start_time`; starting a running clock is a no-op.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        self.resumed_at = Some(now);
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Pauses the clock, folding the running stretch into
    /// `time_elapsed`. Pausing a paused clock is a no-op.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.is_running {
            return;
        }
        if let Some(resumed) = self.resumed_at {
            let stretch = (now - resumed).num_seconds().max(0);
            self.time_elapsed += stretch;
        }
        self.is_running = false;
        self.resumed_at = None;
    }

    /// Seconds on the clock as of `now`, including the running stretch.
    pub fn elapsed(&self, now: DateTime<Utc>) -> i64 {
        match (self.is_running, self.resumed_at) {
            (true, Some(resumed)) => self.time_elapsed + (now - resumed).num_seconds().max(0),
            _ => self.time_elapsed,
        }
    }

    /// Applies a goal for the given team against the fixture's sides.
    /// Events for teams outside the fixture leave the score alone.
    pub fn apply_goal(&mut self, fixture: &Fixture, team_id: u32) {
        if team_id == fixture.home_team_id {
            self.score_home += 1;
        } else if team_id == fixture.away_team_id {
            self.score_away += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SboEventType {
    Goal,
    Foul,
    Timeout,
    Injury,
    Substitution,
    Other,
}

impl SboEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SboEventType::Goal => "goal",
            SboEventType::Foul => "foul",
            SboEventType::Timeout => "timeout",
            SboEventType::Injury => "injury",
            SboEventType::Substitution => "substitution",
            SboEventType::Other => "other",
        }
    }

    pub fn from_str_name(value: &str) -> Option<SboEventType> {
        match value {
            "goal" => Some(SboEventType::Goal),
            "foul" => Some(SboEventType::Foul),
            "timeout" => Some(SboEventType::Timeout),
            "injury" => Some(SboEventType::Injury),
            "substitution" => Some(SboEventType::Substitution),
            "other" => Some(SboEventType::Other),
            _ => None,
        }
    }
}

/// One line of the timestamped game log. `meta` carries event-specific
/// extras (time remaining, penalty seconds, ...) verbatim.
#[derive(Debug, Clone)]
pub struct SboEvent {
    pub id: u32,
    pub game_id: u32,
    pub timestamp: DateTime<Utc>,
    pub event_type: SboEventType,
    pub team_id: Option<u32>,
    pub player_id: Option<u32>,
    pub meta: Value,
    pub description: String,
}

/// Scoreboard control: the fixture's assigned referee, any timekeeper,
/// or an administrative role.
pub fn can_operate_game(user: &User, fixture: &Fixture) -> bool {
    fixture.referee_id == Some(user.id)
        || user.role == UserRole::Timekeeper
        || user.role.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureStatus;
    use chrono::TimeZone;

    fn fixture() -> Fixture {
        Fixture {
            id: 1,
            home_team_id: 10,
            away_team_id: 20,
            venue_id: None,
            kickoff: Utc::now(),
            competition: String::new(),
            round: String::new(),
            referee_id: Some(5),
            status: FixtureStatus::Ongoing,
            result_home: None,
            result_away: None,
            referee_preference_ids: Vec::new(),
            slug: "home-vs-away".to_string(),
            short_code: "F1X2U3".to_string(),
            additional_info: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn game() -> SboGame {
        SboGame {
            id: 1,
            fixture_id: 1,
            start_time: None,
            score_home: 0,
            score_away: 0,
            time_elapsed: 0,
            is_running: false,
            resumed_at: None,
            slug: "home-vs-away-live".to_string(),
            short_code: "G4M5E6".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

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

    #[test]
    fn test_clock_start_pause_accumulates() {
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap();
        let mut g = game();

        g.start(t0);
        assert!(g.is_running);
        assert_eq!(g.start_time, Some(t0));

        g.pause(t0 + chrono::Duration::seconds(90));
        assert!(!g.is_running);
        assert_eq!(g.time_elapsed, 90);

        // second half: start_time stays at the first start
        g.start(t0 + chrono::Duration::seconds(900));
        assert_eq!(g.start_time, Some(t0));
        g.pause(t0 + chrono::Duration::seconds(960));
        assert_eq!(g.time_elapsed, 150);
    }

    #[test]
    fn test_clock_double_start_and_pause_are_noops() {
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap();
        let mut g = game();

        g.pause(t0);
        assert_eq!(g.time_elapsed, 0);

        g.start(t0);
        let resumed = g.resumed_at;
        g.start(t0 + chrono::Duration::seconds(30));
        assert_eq!(g.resumed_at, resumed);
    }

    #[test]
    fn test_elapsed_includes_running_stretch() {
        let t0 = Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap();
        let mut g = game();

        g.start(t0);
        assert_eq!(g.elapsed(t0 + chrono::Duration::seconds(42)), 42);

        g.pause(t0 + chrono::Duration::seconds(60));
        assert_eq!(g.elapsed(t0 + chrono::Duration::seconds(120)), 60);
    }

    #[test]
    fn test_goal_resolves_side() {
        let f = fixture();
        let mut g = game();

        g.apply_goal(&f, 10);
        g.apply_goal(&f, 20);
        g.apply_goal(&f, 20);
        assert_eq!((g.score_home, g.score_away), (1, 2));

        // unknown team leaves the score alone
        g.apply_goal(&f, 99);
        assert_eq!((g.score_home, g.score_away), (1, 2));
    }

    #[test]
    fn test_event_type_round_trip() {
        for t in [
            SboEventType::Goal,
            SboEventType::Foul,
            SboEventType::Timeout,
            SboEventType::Injury,
            SboEventType::Substitution,
            SboEventType::Other,
        ] {
            assert_eq!(SboEventType::from_str_name(t.as_str()), Some(t));
        }
        assert_eq!(SboEventType::from_str_name("corner"), None);
    }

    #[test]
    fn test_operate_permissions() {
        let f = fixture();
        assert!(can_operate_game(&user(5, UserRole::Referee), &f));
        assert!(can_operate_game(&user(9, UserRole::Timekeeper), &f));
        assert!(can_operate_game(&user(9, UserRole::GlobalAdmin), &f));
        assert!(!can_operate_game(&user(9, UserRole::Referee), &f));
        assert!(!can_operate_game(&user(9, UserRole::Player), &f));
    }
}
