use serde::{Deserialize, Serialize};
use crate::enums::segment_kind::SegmentKind;

/// A classified span of draft text, produced fresh by the diff generators on
/// every render and never persisted.
///
/// Invariant across every generator: concatenating segment text while
/// skipping deletions reproduces the modified text, and skipping additions
/// reproduces the reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
    /// Back-reference to the change that produced this span, for styling and
    /// lookup only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
}

impl DiffSegment {
    pub fn unchanged(text: &str) -> Self {
        Self { kind: SegmentKind::Unchanged, text: text.to_string(), change_id: None }
    }

    pub fn addition(text: &str) -> Self {
        Self { kind: SegmentKind::Addition, text: text.to_string(), change_id: None }
    }

    pub fn deletion(text: &str) -> Self {
        Self { kind: SegmentKind::Deletion, text: text.to_string(), change_id: None }
    }

    pub fn with_change_id(mut self, change_id: &str) -> Self {
        self.change_id = Some(change_id.to_string());
        self
    }
}
