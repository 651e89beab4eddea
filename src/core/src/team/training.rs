use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weekly training slot. Expanded into concrete `TrainingEvent`s between
/// `start_date` and `end_date` inclusive.
#[derive(Debug, Clone)]
pub struct TrainingSeries {
    pub id: u32,
    pub team_id: u32,
    pub weekday: chrono::Weekday,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// One concrete training date on the team calendar.
#[derive(Debug, Clone)]
pub struct TrainingEvent {
    pub id: u32,
    pub team_id: u32,
    pub start: NaiveDateTime,
    pub location: String,
    pub note: String,
    pub created_by: Option<u32>,
    pub series_id: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
            RsvpStatus::Maybe => "maybe",
        }
    }

    pub fn from_str_name(value: &str) -> Option<RsvpStatus> {
        match value {
            "yes" => Some(RsvpStatus::Yes),
            "no" => Some(RsvpStatus::No),
            "maybe" => Some(RsvpStatus::Maybe),
            _ => None,
        }
    }
}

/// One (event, user) response. Unique per pair, later answers replace
/// earlier ones.
#[derive(Debug, Clone)]
pub struct TrainingRsvp {
    pub id: u32,
    pub training_id: u32,
    pub user_id: u32,
    pub status: RsvpStatus,
    pub comment: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A comment is only kept alongside a decline; switching the answer away
/// from `No` clears whatever was there.
pub fn rsvp_comment(status: RsvpStatus, comment: Option<&str>) -> Option<String> {
    match status {
        RsvpStatus::No => comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Expands a series into the event timestamps that still need creating.
///
/// Starts at the first matching weekday on or after `start_date`, steps
/// weekly through `end_date` inclusive, and skips timestamps already
/// present in `existing` - re-running an expansion is idempotent.
pub fn expansion_dates(
    series: &TrainingSeries,
    existing: &HashSet<NaiveDateTime>,
) -> Vec<NaiveDateTime> {
    let mut dates = Vec::new();

    let offset = (7 + series.weekday.num_days_from_monday() as i64
        - series.start_date.weekday().num_days_from_monday() as i64)
        % 7;
    let mut current = series.start_date + Duration::days(offset);

    while current <= series.end_date {
        let start = current.and_time(series.time);
        if !existing.contains(&start) {
            dates.push(start);
        }
        current += Duration::days(7);
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn series(weekday: Weekday, start: (i32, u32, u32), end: (i32, u32, u32)) -> TrainingSeries {
        TrainingSeries {
            id: 1,
            team_id: 1,
            weekday,
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expansion_weekly_inclusive() {
        // 2026-08-03 is a Monday, 2026-08-31 is the last Monday in range
        let s = series(Weekday::Mon, (2026, 8, 1), (2026, 8, 31));
        let dates = expansion_dates(&s, &HashSet::new());

        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0].date(), NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(dates[4].date(), NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
        assert!(dates.iter().all(|d| d.time() == NaiveTime::from_hms_opt(19, 30, 0).unwrap()));
    }

    #[test]
    fn test_expansion_start_on_matching_weekday() {
        // start_date itself is a Saturday
        let s = series(Weekday::Sat, (2026, 8, 1), (2026, 8, 15));
        let dates = expansion_dates(&s, &HashSet::new());

        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0].date(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }

    #[test]
    fn test_expansion_skips_existing() {
        let s = series(Weekday::Mon, (2026, 8, 1), (2026, 8, 31));
        let all = expansion_dates(&s, &HashSet::new());

        let existing: HashSet<NaiveDateTime> = all.iter().take(2).copied().collect();
        let remaining = expansion_dates(&s, &existing);

        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0], all[2]);
    }

    #[test]
    fn test_expansion_idempotent_when_all_exist() {
        let s = series(Weekday::Wed, (2026, 1, 1), (2026, 3, 31));
        let all: HashSet<NaiveDateTime> = expansion_dates(&s, &HashSet::new()).into_iter().collect();

        assert!(expansion_dates(&s, &all).is_empty());
    }

    #[test]
    fn test_expansion_empty_when_no_weekday_in_range() {
        // only two days of range, neither a Friday
        let s = series(Weekday::Fri, (2026, 8, 3), (2026, 8, 4));
        assert!(expansion_dates(&s, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_rsvp_comment_only_kept_on_decline() {
        assert_eq!(
            rsvp_comment(RsvpStatus::No, Some(" on shift ")),
            Some("on shift".to_string())
        );
        assert_eq!(rsvp_comment(RsvpStatus::No, Some("   ")), None);
        assert_eq!(rsvp_comment(RsvpStatus::Yes, Some("ignored")), None);
        assert_eq!(rsvp_comment(RsvpStatus::Maybe, Some("ignored")), None);
    }

    #[test]
    fn test_rsvp_status_round_trip() {
        for status in [RsvpStatus::Yes, RsvpStatus::No, RsvpStatus::Maybe] {
            assert_eq!(RsvpStatus::from_str_name(status.as_str()), Some(status));
        }
        assert_eq!(RsvpStatus::from_str_name("perhaps"), None);
    }
}
