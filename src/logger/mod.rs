pub mod animated_logger;
pub mod redline_logger;
