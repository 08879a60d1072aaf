use std::pin::Pin;
use async_trait::async_trait;
use futures::{future, Stream, StreamExt};
use reqwest::Client;
use serde::Serialize;
use crate::enums::assistant_error::AssistantError;
use crate::enums::stream_event_data::StreamEventData;
use crate::structs::chat_message::ChatMessage;
use crate::structs::stream_item::StreamItem;
use crate::traits::assistant_provider::AssistantProvider;

#[derive(Serialize)]
struct ChatRequest {
    message: String,
    context_text: String,
    history: Vec<ChatMessage>,
    stream: bool,
}

/// HTTP client for the remote drafting assistant's SSE chat endpoint.
#[derive(Clone)]
pub struct DraftAssistant {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl DraftAssistant {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url,
            client: Client::new(),
        }
    }

    async fn make_request(&self, url: String, request_body: ChatRequest) -> Result<reqwest::Response, AssistantError> {
        log::info!("📦 Chat request to {}", url);

        let mut request = self.client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream");

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        request
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))
    }

    fn parse_sse_line(line: &str) -> Option<Result<StreamItem, AssistantError>> {
        if line.trim().is_empty() || !line.starts_with("data: ") {
            return None;
        }

        let data = &line[6..];

        if data.trim() == "[DONE]" {
            return None;
        }

        match serde_json::from_str::<StreamEventData>(data) {
            Ok(event_data) => {
                let item = match event_data {
                    StreamEventData::MessageStart => StreamItem::new(String::new()),
                    StreamEventData::ContentDelta { text } => StreamItem::new(text),
                    StreamEventData::Suggestion { change } => StreamItem::suggestion(change),
                    StreamEventData::MessageComplete { confidence, .. } => {
                        StreamItem::complete(confidence)
                    }
                    StreamEventData::Ping => StreamItem::new(String::new()),
                    StreamEventData::Error { error } => {
                        return Some(Err(AssistantError::ApiError(format!(
                            "{}: {}",
                            error.error_type, error.message
                        ))));
                    }
                };
                Some(Ok(item))
            }
            Err(e) => Some(Err(AssistantError::SerializationError(format!(
                "Failed to parse event: {}",
                e
            )))),
        }
    }
}

#[async_trait]
impl AssistantProvider for DraftAssistant {

    async fn stream_chat(&self, message: String, context_text: String, history: Vec<ChatMessage>)
        -> Result<Pin<Box<dyn Stream<Item = Result<StreamItem, AssistantError>> + Send>>, AssistantError> {
        let url = format!("{}/chat", self.base_url);
        let request_body = ChatRequest {
            message,
            context_text,
            history,
            stream: true,
        };

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ Assistant API error response: {}", error_text);

            return Err(match status.as_u16() {
                401 => AssistantError::AuthenticationError(error_text),
                _ => AssistantError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        // Use scan for stateful stream processing
        let stream = response
            .bytes_stream()
            .scan(String::new(), |buffer, chunk_result| {
                future::ready(match chunk_result {
                    Ok(bytes) => {
                        let chunk_str = String::from_utf8_lossy(&bytes);
                        buffer.push_str(&chunk_str);

                        let mut items = Vec::new();

                        // Process buffer line by line
                        while let Some(newline_pos) = buffer.find('\n') {
                            let line = buffer[..newline_pos].to_string();
                            buffer.drain(..=newline_pos);

                            if let Some(result) = Self::parse_sse_line(&line) {
                                items.push(result);
                            }
                        }

                        Some(futures::stream::iter(items))
                    }
                    Err(e) => {
                        let error = AssistantError::NetworkError(format!("Stream error: {}", e));
                        Some(futures::stream::iter(vec![Err(error)]))
                    }
                })
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}
