use std::path::PathBuf;
use std::time::Duration;
use once_cell::sync::Lazy;

pub const DEFAULT_REVIEW_TIMEOUT_MINUTES: u64 = 30;
pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const MAX_SESSION_ID_LENGTH: usize = 64;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;
pub const SESSION_COMPLETION_POLL_INTERVAL_MS: u64 = 500;
pub const AUTOSAVE_POLL_INTERVAL_MS: u64 = 250;
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

pub const API_KEY_ENV: &str = "LEXLINE_API_KEY";

/// Resolved once; `~/lexline/config.toml` when a home directory exists.
pub static CONFIG_FILE: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::home_dir().map(|d| d.join("lexline/config.toml")));

pub fn timeout_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes * 60)
}

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}
