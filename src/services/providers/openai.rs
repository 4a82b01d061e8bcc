//! OpenAI completion provider implementation.
//!
//! Calls the legacy text-completions API and maps its responses onto the
//! binding wire shape.

use super::{CompletionProvider, CompletionRequest, ProviderError};
use crate::config::OpenAiConfig;
use crate::models::completion::{Choice, CompletionResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAI completion provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }
}

#[derive(Serialize)]
struct CompletionsApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionsApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: Value,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let body = CompletionsApiRequest {
            model: &request.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            "Sending completion request to OpenAI API"
        );

        let response = self
            .client
            .post(self.api_url("completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // A structured error body (rate limits included) is part of the
            // binding contract: hand it to the handler as an unsuccessful
            // result rather than failing the call.
            if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&error_text) {
                tracing::warn!(status = %status, "OpenAI API returned an error body");
                return Ok(CompletionResult::failure(envelope.error));
            }

            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let api_response: CompletionsApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(CompletionResult {
            successful: true,
            error: None,
            choices: api_response
                .choices
                .into_iter()
                .map(|c| Choice { text: c.text })
                .collect(),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "models endpoint returned {}",
                response.status()
            )))
        }
    }
}
