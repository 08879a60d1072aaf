use serde::{Deserialize, Serialize};
use crate::structs::change_descriptor::ChangeDescriptor;

/// A suggested change held in the editor until the user acts on it.
///
/// Applied changes are retained as the historical record that anchors the
/// redline against the pre-change draft; they leave the collection only
/// through an explicit clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingChange {
    #[serde(flatten)]
    pub change: ChangeDescriptor,
    #[serde(default)]
    pub applied: bool,
    #[serde(default)]
    pub preview_mode: bool,
}

impl PendingChange {
    pub fn new(change: ChangeDescriptor) -> Self {
        Self {
            change,
            applied: false,
            preview_mode: false,
        }
    }
}
