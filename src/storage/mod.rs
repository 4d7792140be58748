//! Storage Layer
//!
//! Handles JSON config persistence.

pub mod config;

pub use config::*;
