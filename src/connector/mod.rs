//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM completion (OpenAI-compatible) and web search adapters
//! - Dependency wiring and CLI command routing
//! - The axum HTTP surface

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
pub use api::*;
pub use http::{app, serve, ApiError};
