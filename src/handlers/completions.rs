//! Text-completion route handlers.

use crate::error::AppError;
use crate::models::completion::{CompletionResult, PromptPayload, default_error};
use crate::startup::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use validator::Validate;

/// Shared response shaping for completion results.
///
/// Parses the binding's JSON string and maps it to an HTTP response: a
/// failed completion becomes a 500 with the upstream error object as the
/// body (a synthetic default when none was supplied); a successful one
/// becomes a 200 with the first choice's text. A string that does not parse
/// as a completion result fails the request outright.
fn shape_response(raw: &str) -> Result<Response, AppError> {
    let result: CompletionResult = serde_json::from_str(raw)?;

    if !result.successful {
        let error = result.error.unwrap_or_else(default_error);
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response());
    }

    Ok((StatusCode::OK, first_choice_text(result)?).into_response())
}

fn first_choice_text(result: CompletionResult) -> Result<String, AppError> {
    result
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("completion returned no choices")))
}

/// `GET /whois/:name` — templating pattern: the path parameter is embedded
/// into a fixed prompt.
///
/// Unlike `generic_completion`, this route never inspects the `Successful`
/// flag; a failed completion that still carries a choice returns 200.
/// Preserved as-is, see DESIGN.md.
pub async fn whois(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let vars = HashMap::from([("name", name.as_str())]);
    let raw = state.whois_binding.resolve(&vars).await?;

    let result: CompletionResult = serde_json::from_str(&raw)?;
    Ok((StatusCode::OK, first_choice_text(result)?).into_response())
}

/// `POST /generic_completion` — free-form prompt passthrough with full
/// success/failure shaping.
pub async fn generic_completion(
    State(state): State<AppState>,
    Json(payload): Json<PromptPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let vars = HashMap::from([("Prompt", payload.prompt.as_str())]);
    let raw = state.generic_binding.resolve(&vars).await?;

    tracing::info!(prompt = %payload.prompt, "Shaping generic completion response");
    shape_response(&raw)
}
