//! Career Copilot Core
//!
//! Foundational types shared by every crate in the Career Copilot workspace.
//! This crate has no knowledge of agents, HTTP backends or the workflow itself.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `schema` - Output shape descriptors sent to generation backends (`OutputSchema`)
//! - `proxy` - Outbound proxy configuration shared by HTTP backends

pub mod error;
pub mod proxy;
pub mod schema;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Output Shapes ──────────────────────────────────────────────────────
pub use schema::{OutputSchema, SchemaType};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
