use serde::Deserialize;
use std::fmt;

pub const API_KEY_ENV: &str = "TRACKING_API_KEY";
pub const PLACEHOLDER_API_KEY: &str = "demo-key";
const DEFAULT_BASE_URL: &str = "https://api.tracking-provider.example/v1";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_BATCH_CONCURRENCY: i64 = 8;
const DEFAULT_MAX_BATCH_SIZE: i64 = 100;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub tracking: TrackingSettings,
    pub server: ServerSettings,
}

#[derive(Deserialize, Clone)]
pub struct TrackingSettings {
    pub base_url: String,
    pub api_key: String,
    /// Serve demo records when the live provider returns nothing.
    pub demo_fallback: bool,
    /// Provider calls in flight at once for a batch lookup.
    pub batch_concurrency: usize,
    pub max_batch_size: usize,
}

impl TrackingSettings {
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

impl fmt::Debug for TrackingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("demo_fallback", &self.demo_fallback)
            .field("batch_concurrency", &self.batch_concurrency)
            .field("max_batch_size", &self.max_batch_size)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_app_config(std::env::var(API_KEY_ENV).ok())
}

/// Layer defaults, `config/tracking.*`, `TRACKING__*` variables and the API key.
pub fn build_app_config(api_key: Option<String>) -> anyhow::Result<AppConfig> {
    let api_key = api_key.filter(|key| !key.trim().is_empty());

    let settings = config::Config::builder()
        .set_default("tracking.base_url", DEFAULT_BASE_URL)?
        .set_default("tracking.api_key", PLACEHOLDER_API_KEY)?
        .set_default("tracking.demo_fallback", true)?
        .set_default("tracking.batch_concurrency", DEFAULT_BATCH_CONCURRENCY)?
        .set_default("tracking.max_batch_size", DEFAULT_MAX_BATCH_SIZE)?
        .set_default("server.bind_address", DEFAULT_BIND_ADDRESS)?
        .add_source(config::File::with_name("config/tracking").required(false))
        .add_source(
            config::Environment::with_prefix("TRACKING")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("tracking.api_key", api_key)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
