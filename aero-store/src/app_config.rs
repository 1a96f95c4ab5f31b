use aero_core::Masked;
use aero_offer::FilterConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub offer_source: OfferSourceConfig,
    #[serde(default)]
    pub search: SearchDefaults,
    #[serde(default)]
    pub sessions: SessionSettings,
    /// Filters a new search session starts with
    #[serde(default)]
    pub filters: FilterConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfferSourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub client_id: String,
    pub client_secret: Masked<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Refresh the bearer token this long before it expires
    #[serde(default = "default_token_refresh_margin")]
    pub token_refresh_margin_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchDefaults {
    #[serde(default = "default_adults")]
    pub default_adults: u32,
    #[serde(default = "default_max")]
    pub default_max: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_adults: default_adults(),
            default_max: default_max(),
        }
    }
}

/// Idle session eviction
#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// Sessions untouched for this long are dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_base_url() -> String { "https://test.api.amadeus.com".to_string() }
fn default_timeout_seconds() -> u64 { 15 }
fn default_token_refresh_margin() -> i64 { 30 }
fn default_adults() -> u32 { aero_core::search::DEFAULT_ADULTS }
fn default_max() -> u32 { aero_core::search::DEFAULT_MAX_RESULTS }
fn default_idle_timeout() -> u64 { 1800 }
fn default_sweep_interval() -> u64 { 60 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. AERO__OFFER_SOURCE__CLIENT_SECRET=...
            .add_source(config::Environment::with_prefix("AERO").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build from an inline TOML document, without files or environment
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
