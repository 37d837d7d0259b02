//! # Search
//!
//! The orchestrator and its configuration.

pub mod config;
pub mod engine;

pub use config::{SearchConfig, DEFAULT_LIMIT};
pub use engine::SearchEngine;
