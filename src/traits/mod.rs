pub mod assistant_provider;
pub mod draft_store;
