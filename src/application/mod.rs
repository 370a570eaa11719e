//! # Application Layer
//!
//! Provider interfaces and the chat use case that sequences them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
