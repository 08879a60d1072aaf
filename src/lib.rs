//! AI-assisted redlining for legal drafts.
//!
//! The core of the crate is the edit-tracking engine: offset-anchored
//! [`ChangeDescriptor`](structs::change_descriptor::ChangeDescriptor)s
//! proposed by a remote drafting assistant, pure appliers that splice them
//! into the staging draft, and diff generators that turn the running set of
//! changes into renderable redline segments. Everything network-shaped
//! (assistant chat, draft persistence, document compilation) lives behind
//! thin API clients and stays out of the engine.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod services;
pub mod structs;
pub mod traits;
pub mod ui;
pub mod workers;
