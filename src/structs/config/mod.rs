pub mod api_config;
pub mod config;
pub mod editor_config;
