use serde::Deserialize;
use crate::structs::api_error::ApiError;
use crate::structs::change_descriptor::ChangeDescriptor;

/// Server-sent events emitted by the assistant chat endpoint.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum StreamEventData {
    #[serde(rename = "message_start")]
    MessageStart,
    #[serde(rename = "content_delta")]
    ContentDelta {
        text: String,
    },
    #[serde(rename = "suggestion")]
    Suggestion {
        change: ChangeDescriptor,
    },
    #[serde(rename = "message_complete")]
    MessageComplete {
        confidence: Option<f32>,
        summary: Option<String>,
    },
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "error")]
    Error {
        error: ApiError,
    },
}
