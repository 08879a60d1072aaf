use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use crate::enums::assistant_error::AssistantError;
use crate::structs::chat_message::ChatMessage;
use crate::structs::stream_item::StreamItem;

/// Seam for the drafting assistant. The engine only ever sees a stream of
/// [`StreamItem`]s, so tests and alternate backends can slot in freely.
#[async_trait]
pub trait AssistantProvider: Send + Sync {

    async fn stream_chat(&self, message: String, context_text: String, history: Vec<ChatMessage>)
        -> Result<Pin<Box<dyn Stream<Item = Result<StreamItem, AssistantError>> + Send>>, AssistantError>;
}
