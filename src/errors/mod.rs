use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LexlineError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Draft/file errors
    DraftError {
        draft: String,
        operation: String,
        reason: String,
    },

    // Change descriptor errors
    ChangeValidationError {
        change_id: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        reason: String,
        context: Option<String>,
    },

    // Network/API errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // Review session errors
    SessionError {
        session_id: String,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl LexlineError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn draft_error(draft: &str, operation: &str, reason: &str) -> Self {
        Self::DraftError {
            draft: draft.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn change_error(change_id: &str, reason: &str) -> Self {
        Self::ChangeValidationError {
            change_id: change_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str, context: Option<&str>) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
            context: context.map(|s| s.to_string()),
        }
    }

    pub fn session_error(session_id: &str, reason: &str) -> Self {
        Self::SessionError {
            session_id: session_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NetworkError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::ChangeValidationError { .. } => true,
            Self::ParseError { .. } => true,
            Self::SessionError { .. } => false,
            Self::ConfigurationFileError { .. } => false,
            Self::DraftError { .. } => false,
            Self::SystemError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::DraftError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::NetworkError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::SessionError { .. } => ErrorSeverity::Medium,
            Self::ChangeValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::DraftError { draft, operation, reason } => {
                format!("Draft '{}' error during {}: {}\n💡 Check the draft path and permissions", draft, operation, reason)
            }
            Self::ChangeValidationError { change_id, reason } => {
                format!("Change '{}' failed validation: {}\n💡 The draft may have been edited since the change was proposed", change_id, reason)
            }
            Self::ParseError { content_type, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Your local edits are intact - check the connection and retry");
                msg
            }
            Self::SessionError { session_id, reason } => {
                format!("Review session '{}' error: {}\n💡 Start a new review session", session_id, reason)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}\n💡 This may require manual intervention", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for LexlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for LexlineError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for lexline operations
pub type LexlineResult<T> = Result<T, LexlineError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &LexlineError) {
        let severity = error.severity();

        // Log technical details
        log::error!("[{}] {}", severity.name(), error.technical_details());

        // Print user-friendly message
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for LexlineError {
    fn from(error: std::io::Error) -> Self {
        LexlineError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LexlineError {
    fn from(error: serde_json::Error) -> Self {
        LexlineError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<toml::de::Error> for LexlineError {
    fn from(error: toml::de::Error) -> Self {
        LexlineError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
            context: None,
        }
    }
}

impl From<crate::enums::assistant_error::AssistantError> for LexlineError {
    fn from(error: crate::enums::assistant_error::AssistantError) -> Self {
        LexlineError::NetworkError {
            operation: "assistant chat".to_string(),
            url: None,
            status_code: None,
            reason: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for LexlineError {
    fn from(error: reqwest::Error) -> Self {
        LexlineError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}
