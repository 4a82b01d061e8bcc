//! Explicit replacement for declarative completion input bindings.
//!
//! A [`TextCompletionBinding`] owns a prompt template and a provider handle.
//! Route adapters render the template from request parameters and receive
//! the completion result serialized back to a JSON string, which the
//! handler re-parses. The string-typed seam keeps the handler contract
//! independent of the provider types.

use crate::models::completion::default_error;
use crate::services::providers::{CompletionProvider, CompletionRequest, ProviderError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Unresolved placeholder '{{{0}}}' in prompt template")]
    UnresolvedPlaceholder(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Upstream completion failed: {0}")]
    Upstream(Value),

    #[error("Failed to serialize completion result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A prompt template with `{placeholder}` slots.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute every `{key}` slot from `vars`.
    ///
    /// A slot with no matching value is an error rather than being sent to
    /// the model verbatim. An unterminated `{` is treated as literal text.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String, BindingError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    let key = &after[..end];
                    match vars.get(key) {
                        Some(value) => out.push_str(value),
                        None => return Err(BindingError::UnresolvedPlaceholder(key.to_string())),
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// Configuration-driven completion binding: template variables in,
/// serialized completion result out.
pub struct TextCompletionBinding {
    provider: Arc<dyn CompletionProvider>,
    template: PromptTemplate,
    model: String,
    max_tokens: Option<u32>,
    throw_on_error: bool,
}

impl TextCompletionBinding {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        template: PromptTemplate,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            template,
            model: model.into(),
            max_tokens: None,
            throw_on_error: false,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// When set, an unsuccessful result fails the binding instead of being
    /// handed to the handler for shaping.
    pub fn with_throw_on_error(mut self, throw_on_error: bool) -> Self {
        self.throw_on_error = throw_on_error;
        self
    }

    /// Render the template, run the completion, and return the result as a
    /// JSON string for the handler to parse.
    pub async fn resolve(&self, vars: &HashMap<&str, &str>) -> Result<String, BindingError> {
        let prompt = self.template.render(vars)?;
        let request = CompletionRequest {
            prompt,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: None,
        };

        tracing::info!(
            model = %request.model,
            prompt = %request.prompt,
            "Resolving completion binding"
        );

        let result = self.provider.complete(&request).await?;

        if self.throw_on_error && !result.successful {
            let error = result.error.clone().unwrap_or_else(default_error);
            return Err(BindingError::Upstream(error));
        }

        Ok(serde_json::to_string(&result)?)
    }
}
