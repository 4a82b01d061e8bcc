//! HTTP handlers for the completion service.

pub mod completions;
pub mod health;
