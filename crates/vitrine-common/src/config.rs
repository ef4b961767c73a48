//! Client configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > vitrine.toml > defaults

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration from environment.
///
/// Later calls return the configuration built by the first one.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let app_config = load()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// Build a configuration without touching the global slot.
pub fn load() -> Result<AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        .set_default("api.base_url", "http://localhost:8000")?
        .set_default("api.upload_base", "")?
        .set_default("api.timeout_secs", 30)?
        .set_default("storage.token_path", "./.vitrine/session.json")?
        // Optional config file
        .add_source(config::File::with_name("vitrine").required(false))
        // Environment variables (VITRINE__API__BASE_URL, VITRINE__STORAGE__TOKEN_PATH, etc.)
        .add_source(
            config::Environment::with_prefix("VITRINE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    cfg.try_deserialize()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend origin, without the `/api` suffix (e.g. "http://localhost:8000").
    pub base_url: String,
    /// Prefix under which relative media keys are served.
    /// Empty means `<base_url>/uploads`.
    pub upload_base: String,
    /// Per-request timeout. `0` disables it.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn upload_base(&self) -> String {
        if self.upload_base.trim().is_empty() {
            format!("{}/uploads", self.base_url())
        } else {
            self.upload_base.trim_end_matches('/').to_owned()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding the persisted session token.
    pub token_path: PathBuf,
}
