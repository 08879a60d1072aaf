use serde::{Deserialize, Serialize};
use crate::structs::change_descriptor::ChangeDescriptor;

/// One unit of the assistant's streamed chat reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamItem {
    pub content: String,
    pub suggestion: Option<ChangeDescriptor>,
    pub confidence: Option<f32>,
    pub is_complete: bool,
}

impl StreamItem {
    pub fn new(content: String) -> Self {
        Self {
            content,
            suggestion: None,
            confidence: None,
            is_complete: false,
        }
    }

    pub fn suggestion(change: ChangeDescriptor) -> Self {
        Self {
            content: String::new(),
            suggestion: Some(change),
            confidence: None,
            is_complete: false,
        }
    }

    pub fn complete(confidence: Option<f32>) -> Self {
        Self {
            content: String::new(),
            suggestion: None,
            confidence,
            is_complete: true,
        }
    }
}
