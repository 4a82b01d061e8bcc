//! Integration tests for the text-completion routes.
//!
//! Run with: cargo test --test completions_test

use completion_service::config::AppConfig;
use completion_service::models::completion::{Choice, CompletionResult};
use completion_service::services::providers::CompletionProvider;
use completion_service::services::providers::mock::MockProvider;
use completion_service::startup::Application;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port with the given provider.
async fn spawn_app(provider: Arc<dyn CompletionProvider>) -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::set_var("OPENAI_API_KEY", "test-api-key");

    let config = AppConfig::load().expect("Failed to load config");
    let app = Application::build(config, provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn generic_completion_returns_first_choice_text() {
    let provider = Arc::new(MockProvider::with_results([CompletionResult::success(
        "Ada Lovelace was a mathematician.",
    )]));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/generic_completion", port))
        .json(&json!({"Prompt": "Who was Ada Lovelace?"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Ada Lovelace was a mathematician."
    );
}

#[tokio::test]
async fn generic_completion_surfaces_upstream_error_as_500() {
    let provider = Arc::new(MockProvider::with_results([CompletionResult::failure(
        json!({"MessageObject": "rate limited"}),
    )]));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/generic_completion", port))
        .json(&json!({"Prompt": "anything"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({"MessageObject": "rate limited"}));
}

#[tokio::test]
async fn generic_completion_defaults_missing_error_detail() {
    let provider = Arc::new(MockProvider::with_results([CompletionResult {
        successful: false,
        error: None,
        choices: Vec::new(),
    }]));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/generic_completion", port))
        .json(&json!({"Prompt": "anything"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({"MessageObject": "OpenAI returned an unspecified error"})
    );
}

#[tokio::test]
async fn generic_completion_rejects_an_empty_prompt() {
    let provider = Arc::new(MockProvider::new(true));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .post(format!("http://localhost:{}/generic_completion", port))
        .json(&json!({"Prompt": ""}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn whois_renders_the_name_into_the_prompt() {
    // The echo mock returns the rendered prompt, which proves the path
    // parameter was substituted into the template.
    let provider = Arc::new(MockProvider::new(true));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .get(format!("http://localhost:{}/whois/ada", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Mock response for: Who is ada?"
    );
}

#[tokio::test]
async fn whois_ignores_the_success_flag() {
    let provider = Arc::new(MockProvider::with_results([CompletionResult {
        successful: false,
        error: Some(json!({"MessageObject": "quota exhausted"})),
        choices: vec![Choice {
            text: "Grace Hopper was a computer scientist.".to_string(),
        }],
    }]));
    let port = spawn_app(provider).await;

    let response = Client::new()
        .get(format!("http://localhost:{}/whois/grace", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Grace Hopper was a computer scientist."
    );
}
