use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Service configuration loaded from environment variables.
///
/// One struct covers all four services; settings a service does not
/// use are simply ignored, and the `require_*` accessors turn a
/// missing setting into a startup failure for the services that do
/// need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub model_base_url: Option<String>,
    pub model_id: Option<String>,
    pub model_api_key: String,
    pub target_url: Option<String>,
    pub scrape_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            model_base_url: env::var("LANGUAGE_MODEL_BASE_URL").ok(),
            model_id: env::var("LANGUAGE_MODEL_ID").ok(),
            // Locally hosted model endpoints accept any key.
            model_api_key: env::var("LANGUAGE_MODEL_API_KEY")
                .unwrap_or_else(|_| "dummy".to_string()),
            target_url: env::var("WHATSON_TARGET_URL").ok(),
            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("SCRAPE_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn require_model_base_url(&self) -> Result<&str> {
        self.model_base_url
            .as_deref()
            .context("LANGUAGE_MODEL_BASE_URL must be set")
    }

    pub fn require_model_id(&self) -> Result<&str> {
        self.model_id.as_deref().context("LANGUAGE_MODEL_ID must be set")
    }

    pub fn require_target_url(&self) -> Result<&str> {
        self.target_url
            .as_deref()
            .context("WHATSON_TARGET_URL must be set")
    }
}
