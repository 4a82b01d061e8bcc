//! Completion provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for text-completion
//! providers, allowing easy swapping between backends (OpenAI, mock).

pub mod mock;
pub mod openai;

use crate::models::completion::CompletionResult;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Parameters for a single completion call, assembled by the binding.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Trait for text-completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion.
    ///
    /// API-level failures that produce an upstream error body come back as
    /// an unsuccessful [`CompletionResult`] for the handler to branch on.
    /// Transport and decode failures are `Err`.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
