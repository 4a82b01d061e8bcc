//! Application startup and lifecycle management.
//!
//! Routes and their completion bindings are wired here explicitly at
//! startup; nothing is registered as a module-level side effect.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers::completions::{generic_completion, whois};
use crate::handlers::health::{health_check, readiness_check};
use crate::services::binding::{PromptTemplate, TextCompletionBinding};
use crate::services::providers::CompletionProvider;
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Prompt templates the routes are bound to.
const WHOIS_PROMPT: &str = "Who is {name}?";
const GENERIC_PROMPT: &str = "{Prompt}";

/// Token budget for the whois prompt.
const WHOIS_MAX_TOKENS: u32 = 100;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub whois_binding: Arc<TextCompletionBinding>,
    pub generic_binding: Arc<TextCompletionBinding>,
    pub provider: Arc<dyn CompletionProvider>,
}

/// Build the route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/whois/:name", get(whois))
        .route("/generic_completion", post(generic_completion))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration and provider.
    pub async fn build(
        config: AppConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let model = config.openai.completion_model.clone();

        let whois_binding = Arc::new(
            TextCompletionBinding::new(
                provider.clone(),
                PromptTemplate::new(WHOIS_PROMPT),
                model.clone(),
            )
            .with_max_tokens(WHOIS_MAX_TOKENS),
        );
        let generic_binding = Arc::new(TextCompletionBinding::new(
            provider.clone(),
            PromptTemplate::new(GENERIC_PROMPT),
            model,
        ));

        let state = AppState {
            whois_binding,
            generic_binding,
            provider,
        };

        // Bind the listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Completion service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
