use serde::{Deserialize, Serialize};
use crate::enums::editor_phase::EditorPhase;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::pending_change::PendingChange;

/// The full, serializable state of one draft under review.
///
/// Everything the diff core needs lives here, so the engine can run from a
/// CLI command, the review server, or a test without any rendering
/// environment attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorState {
    /// The evolving draft text.
    pub current_text: String,
    /// Anchor for all redline rendering: the draft text as it was before the
    /// first change was applied. Set once, never reset by later batches.
    pub original_text_before_changes: Option<String>,
    pub pending_changes: Vec<PendingChange>,
    pub show_markup: bool,
    pub has_unsaved_changes: bool,
    pub phase: EditorPhase,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self {
            current_text: text.to_string(),
            original_text_before_changes: None,
            pending_changes: Vec::new(),
            show_markup: false,
            has_unsaved_changes: false,
            phase: EditorPhase::Idle,
        }
    }

    pub fn find_change(&self, change_id: &str) -> Option<&PendingChange> {
        self.pending_changes.iter().find(|c| c.change.id == change_id)
    }

    pub fn find_change_mut(&mut self, change_id: &str) -> Option<&mut PendingChange> {
        self.pending_changes.iter_mut().find(|c| c.change.id == change_id)
    }

    /// Descriptors applied so far, in suggestion order.
    pub fn applied_changes(&self) -> Vec<ChangeDescriptor> {
        self.pending_changes
            .iter()
            .filter(|c| c.applied)
            .map(|c| c.change.clone())
            .collect()
    }

    /// Descriptors still awaiting a user decision.
    pub fn unapplied_changes(&self) -> Vec<ChangeDescriptor> {
        self.pending_changes
            .iter()
            .filter(|c| !c.applied)
            .map(|c| c.change.clone())
            .collect()
    }

    /// The text all redline rendering is anchored to.
    pub fn reference_text(&self) -> &str {
        self.original_text_before_changes
            .as_deref()
            .unwrap_or(&self.current_text)
    }
}
