use serde::{Deserialize, Serialize};

/// Editor lifecycle. Transitions happen only through the
/// [`EditorController`](crate::services::editor_controller::EditorController)
/// operations: ingest moves `Idle -> PendingChanges`, preview moves to
/// `Previewing`, apply/apply-all move to `Applied`, clear returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPhase {
    Idle,
    PendingChanges,
    Previewing,
    Applied,
}
