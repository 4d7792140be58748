//! Data Models
//!
//! Contains the data structures exchanged with the workflow's caller.

pub mod agent;
pub mod analysis;
pub mod profile;
pub mod settings;

pub use agent::*;
pub use analysis::*;
pub use profile::*;
pub use settings::*;
