use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub enum AssistantError {
    ApiError(String),
    NetworkError(String),
    SerializationError(String),
    AuthenticationError(String),
}

impl fmt::Display for AssistantError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssistantError::ApiError(msg) => write!(f, "Assistant API Error: {}", msg),
            AssistantError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AssistantError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            AssistantError::AuthenticationError(msg) => write!(f, "Authentication Error: {}", msg),
        }
    }
}

impl Error for AssistantError {}
