use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staging draft as the persistence endpoint returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
