use chrono::{DateTime, Utc};

/// Append-only team chat line. Listing is newest-first.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u32,
    pub team_id: u32,
    pub user_id: u32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Page size of the chat listing.
pub const CHAT_PAGE_SIZE: u32 = 30;
