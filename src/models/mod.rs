//! Domain models for the completion service.

pub mod completion;

pub use completion::{Choice, CompletionResult, PromptPayload};
