//! Services
//!
//! Business logic services for the library.

pub mod workflow;

pub use workflow::{AgentInvoker, WorkflowCoordinator};
