use serde::{Deserialize, Serialize};

/// Classification of a rendered redline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Unchanged,
    Addition,
    Deletion,
}
