use serde::{Deserialize, Serialize};

/// Age bracket (e.g. "U15"), ordered by `order` for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub order: u32,
}
