use sportdesk_core::{FixtureStatus, RsvpStatus, SboEventType, UserRole};
use serde_json::Value;

// Enum columns are stored as their snake_case wire names. Unknown values
// can only come from hand-edited rows; fall back to the defaults rather
// than failing the whole query.

pub fn parse_role(value: &str) -> UserRole {
    UserRole::from_str_name(value).unwrap_or_default()
}

pub fn parse_fixture_status(value: &str) -> FixtureStatus {
    FixtureStatus::from_str_name(value).unwrap_or_default()
}

pub fn parse_rsvp_status(value: &str) -> RsvpStatus {
    RsvpStatus::from_str_name(value).unwrap_or(RsvpStatus::Maybe)
}

pub fn parse_event_type(value: &str) -> SboEventType {
    SboEventType::from_str_name(value).unwrap_or(SboEventType::Other)
}

pub fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or(Value::Null)
}

pub fn id_u32(value: i64) -> u32 {
    value as u32
}

pub fn opt_id_u32(value: Option<i64>) -> Option<u32> {
    value.map(id_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(parse_role("referee"), UserRole::Referee);
        assert_eq!(parse_role("???"), UserRole::Player);
        assert_eq!(parse_fixture_status("finished"), FixtureStatus::Finished);
        assert_eq!(parse_fixture_status("???"), FixtureStatus::Scheduled);
        assert_eq!(parse_event_type("goal"), SboEventType::Goal);
        assert_eq!(parse_event_type("???"), SboEventType::Other);
        assert_eq!(parse_json("not json"), Value::Null);
    }
}
