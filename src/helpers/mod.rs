pub mod config_helper;
pub mod context_builder;
