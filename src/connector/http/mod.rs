//! HTTP surface: the chat page and the JSON chat endpoint.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use handlers::AppState;
pub use server::{app, serve};
