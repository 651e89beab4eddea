use chrono::{DateTime, Utc};

/// Federation news post. Only `is_public` items appear on the public
/// feed; drafts stay visible to their federation's admins.
#[derive(Debug, Clone)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub slug: String,
    pub author_id: Option<u32>,
    pub federation_id: Option<u32>,
    pub is_public: bool,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
