use serde::{Deserialize, Serialize};

/// Sport taxonomy entry. Clubs, teams and federations reference a sport;
/// the public landing page groups by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sport {
    pub id: u32,
    pub name: String,
    pub slug: String,
}
