use completion_service::config::AppConfig;
use completion_service::observability::init_tracing;
use completion_service::services::providers::CompletionProvider;
use completion_service::services::providers::openai::OpenAiProvider;
use completion_service::startup::Application;
use dotenvy::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing("completion-service", "info");

    let config = AppConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let provider: Arc<dyn CompletionProvider> =
        Arc::new(OpenAiProvider::new(config.openai.clone()));
    tracing::info!(
        model = %config.openai.completion_model,
        "Initialized OpenAI completion provider"
    );

    let app = Application::build(config, provider).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
