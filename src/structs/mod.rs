pub mod api_error;
pub mod apply_outcome;
pub mod assistant_reply;
pub mod change_descriptor;
pub mod chat_message;
pub mod cli;
pub mod config;
pub mod diff_segment;
pub mod draft_document;
pub mod editor_state;
pub mod pending_change;
pub mod review_session;
pub mod stream_item;
pub mod validation_report;
