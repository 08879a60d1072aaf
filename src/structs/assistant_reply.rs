use serde::{Deserialize, Serialize};
use crate::structs::change_descriptor::ChangeDescriptor;

/// Everything the assistant returned for one chat turn: the streamed prose,
/// zero or more structured edit suggestions, and a confidence score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantReply {
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<ChangeDescriptor>,
    #[serde(default)]
    pub confidence: Option<f32>,
}
