use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::session_status::SessionStatus;
use crate::structs::editor_state::EditorState;

/// One interactive review of a draft's suggested changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    pub id: String,
    pub document_name: String,
    pub state: EditorState,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}
