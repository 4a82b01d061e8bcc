//! Wire types for the text-completion binding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

/// Outcome of a completion binding invocation, in the upstream PascalCase
/// wire shape.
///
/// `error` stays a free-form JSON value so that an upstream error body is
/// passed through to the client byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletionResult {
    pub successful: bool,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One ranked completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Choice {
    pub text: String,
}

impl CompletionResult {
    /// Successful result with a single choice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            successful: true,
            error: None,
            choices: vec![Choice { text: text.into() }],
        }
    }

    /// Failed result carrying the upstream error object.
    pub fn failure(error: Value) -> Self {
        Self {
            successful: false,
            error: Some(error),
            choices: Vec::new(),
        }
    }
}

/// Synthetic error used when a failed completion carries no error detail.
pub fn default_error() -> Value {
    json!({ "MessageObject": "OpenAI returned an unspecified error" })
}

/// Request body for `POST /generic_completion`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct PromptPayload {
    #[validate(length(min = 1, message = "Prompt must not be empty"))]
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_upstream_wire_shape() {
        let raw = r#"{
            "Successful": false,
            "Error": {"MessageObject": "rate limited", "Code": "429"},
            "Choices": [{"Text": "ignored"}]
        }"#;

        let result: CompletionResult = serde_json::from_str(raw).unwrap();
        assert!(!result.successful);
        assert_eq!(result.error.unwrap()["MessageObject"], "rate limited");
        assert_eq!(result.choices[0].text, "ignored");
    }

    #[test]
    fn missing_error_and_choices_keys_default() {
        let result: CompletionResult = serde_json::from_str(r#"{"Successful": true}"#).unwrap();
        assert!(result.successful);
        assert!(result.error.is_none());
        assert!(result.choices.is_empty());
    }

    #[test]
    fn serializes_with_pascal_case_keys() {
        let raw = serde_json::to_value(CompletionResult::success("hi")).unwrap();
        assert_eq!(raw["Successful"], true);
        assert_eq!(raw["Choices"][0]["Text"], "hi");
    }
}
