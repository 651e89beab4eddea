use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub address: String,
    pub contact_email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
