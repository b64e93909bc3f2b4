// Entry point for the summarise service.

use std::sync::Arc;

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use pipeline::ai::OpenAiChatModel;
use pipeline::{CacheStore, RedisCacheStore, SummarizeStage};
use server_core::{routes, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting summarise service");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Model settings are required here; fail at startup, not per request.
    let client = OpenAIClient::new(config.model_api_key.clone())
        .with_base_url(config.require_model_base_url()?);
    let model = Arc::new(OpenAiChatModel::new(client, config.require_model_id()?));

    let cache: Arc<dyn CacheStore> = Arc::new(
        RedisCacheStore::connect(&config.redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );

    let stage = Arc::new(SummarizeStage::new(cache, model));
    let app = routes::summarise::router(stage);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
