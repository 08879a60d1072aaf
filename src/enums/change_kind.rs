use serde::{Deserialize, Serialize};

/// The kind of edit a [`ChangeDescriptor`](crate::structs::change_descriptor::ChangeDescriptor)
/// performs against its reference text.
///
/// `Restructure` is part of the assistant's wire vocabulary but carries no
/// applier semantics of its own; it is spliced exactly like `Replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Replace,
    Insert,
    Delete,
    Restructure,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Restructure => "restructure",
        }
    }
}
