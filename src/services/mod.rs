pub mod assistant;
pub mod autosaver;
pub mod change_applier;
pub mod draft_api;
pub mod editor_controller;
pub mod line_diff;
pub mod segment_builder;
pub mod word_diff;
