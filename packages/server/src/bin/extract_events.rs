// Entry point for the extract-events service.

use std::sync::Arc;

use anyhow::{Context, Result};
use pipeline::{CacheStore, ExtractStage, RedisCacheStore};
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

    tracing::info!("Starting extract-events service");

    let config = Config::from_env().context("Failed to load configuration")?;

    let cache: Arc<dyn CacheStore> = Arc::new(
        RedisCacheStore::connect(&config.redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );

    let extractor = Arc::new(ExtractStage::new(cache));
    let app = routes::extract::router(extractor);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
