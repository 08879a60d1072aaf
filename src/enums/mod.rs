pub mod change_kind;
pub mod segment_kind;
pub mod editor_phase;
pub mod commands;
pub mod diff_mode;
pub mod session_status;
pub mod assistant_error;
pub mod stream_event_data;
