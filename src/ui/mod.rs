pub mod markup_renderer;
pub mod review_server;
pub mod session_manager;
