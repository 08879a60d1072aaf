use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::enums::change_kind::ChangeKind;

/// One atomic edit proposed by the drafting assistant, anchored to half-open
/// character offsets `[start_index, end_index)` in the reference text the
/// suggestion was computed against.
///
/// Field names follow the assistant's camelCase wire format. `original_text`
/// is the substring the assistant claims lives at the anchored range; it is
/// advisory and is cross-checked against the live draft before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDescriptor {
    #[serde(default = "generate_change_id")]
    pub id: String,
    pub kind: ChangeKind,
    pub start_index: usize,
    #[serde(default)]
    pub end_index: usize,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub new_text: Option<String>,
    #[serde(default)]
    pub reasoning: String,
}

fn generate_change_id() -> String {
    Uuid::new_v4().to_string()
}

impl ChangeDescriptor {
    pub fn new(kind: ChangeKind, start_index: usize, end_index: usize) -> Self {
        Self {
            id: generate_change_id(),
            kind,
            start_index,
            end_index,
            original_text: None,
            new_text: None,
            reasoning: String::new(),
        }
    }

    pub fn with_new_text(mut self, new_text: &str) -> Self {
        self.new_text = Some(new_text.to_string());
        self
    }

    pub fn with_original_text(mut self, original_text: &str) -> Self {
        self.original_text = Some(original_text.to_string());
        self
    }

    /// Replacement text, absent treated as empty (pure delete).
    pub fn new_text(&self) -> &str {
        self.new_text.as_deref().unwrap_or("")
    }

    /// Claimed original text, absent treated as empty.
    pub fn original_text(&self) -> &str {
        self.original_text.as_deref().unwrap_or("")
    }

    /// Net character delta this change introduces when applied.
    pub fn char_delta(&self) -> i64 {
        let added = self.new_text().chars().count() as i64;
        match self.kind {
            ChangeKind::Insert => added,
            ChangeKind::Delete => -(self.end_index.saturating_sub(self.start_index) as i64),
            ChangeKind::Replace | ChangeKind::Restructure => {
                added - self.end_index.saturating_sub(self.start_index) as i64
            }
        }
    }
}
