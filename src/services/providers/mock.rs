//! Mock provider implementation for testing.

use super::{CompletionProvider, CompletionRequest, ProviderError};
use crate::models::completion::CompletionResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock completion provider.
///
/// Scripted results are replayed in order; with nothing scripted it echoes
/// the rendered prompt back.
pub struct MockProvider {
    enabled: bool,
    scripted: Mutex<VecDeque<CompletionResult>>,
}

impl MockProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            scripted: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_results(results: impl IntoIterator<Item = CompletionResult>) -> Self {
        Self {
            enabled: true,
            scripted: Mutex::new(results.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock provider not enabled".to_string(),
            ));
        }

        if let Some(result) = self
            .scripted
            .lock()
            .expect("scripted results lock poisoned")
            .pop_front()
        {
            return Ok(result);
        }

        Ok(CompletionResult::success(format!(
            "Mock response for: {}",
            request.prompt
        )))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock provider not enabled".to_string(),
            ))
        }
    }
}
