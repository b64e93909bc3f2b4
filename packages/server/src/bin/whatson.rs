// Entry point for the what's-on orchestration service.
//
// Runs all three stage clients in process; each stage still goes
// through its own cache, so results are shared with the standalone
// stage services pointed at the same Redis.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use pipeline::ai::OpenAiChatModel;
use pipeline::{
    CacheStore, ExtractStage, Pipeline, RedisCacheStore, ScrapeStage, SummarizeStage,
};
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

    tracing::info!("Starting what's-on service");

    let config = Config::from_env().context("Failed to load configuration")?;
    let target_url = config.require_target_url()?.to_string();

    let client = OpenAIClient::new(config.model_api_key.clone())
        .with_base_url(config.require_model_base_url()?);
    let model = Arc::new(OpenAiChatModel::new(client, config.require_model_id()?));

    let cache: Arc<dyn CacheStore> = Arc::new(
        RedisCacheStore::connect(&config.redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );

    let fetcher = Arc::new(ScrapeStage::new(
        cache.clone(),
        Duration::from_secs(config.scrape_timeout_secs),
    )?);
    let extractor = Arc::new(ExtractStage::new(cache.clone()));
    let summarizer = Arc::new(SummarizeStage::new(cache, model));
    let pipeline = Arc::new(Pipeline::new(fetcher, extractor, summarizer));

    let app = routes::whatson::router(pipeline, target_url);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
