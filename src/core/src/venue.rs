use chrono::{DateTime, Utc};
use serde_json::Value;

/// Sports hall / ground. `available_slots` is a free-form JSON list kept
/// verbatim for the booking views.
#[derive(Debug, Clone)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub capacity: Option<i32>,
    pub contact: String,
    pub available_slots: Value,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
