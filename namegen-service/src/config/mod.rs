//! Configuration for the two deployments.
//!
//! Both produce the same immutable [`UpstreamConfig`]; they differ only in
//! where the values come from. The pages deployment uses the layered
//! `config` sources, the worker reads plain environment variables.

use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upstream chat-completion endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token sent upstream. Never logged.
    pub api_key: Secret<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl UpstreamConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            model: default_model(),
            api_key: Secret::new(api_key.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the pages deployment (form UI + function).
#[derive(Debug, Clone, Deserialize)]
pub struct PagesSettings {
    #[serde(default)]
    pub server: core_config::Config,
    pub upstream: UpstreamConfig,
}

impl PagesSettings {
    /// Load from an optional `configuration` file overlaid with
    /// `APP__SERVER__*` / `APP__UPSTREAM__*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Settings for the worker deployment.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub server: core_config::Config,
    pub upstream: UpstreamConfig,
}

impl WorkerSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let server = core_config::Config::load()?;
        let upstream = upstream_from_lookup(|key| env::var(key).ok())?;

        Ok(Self { server, upstream })
    }
}

/// Build the upstream config from worker-style variables:
/// `DEEPSEEK_API_KEY` (required), `DEEPSEEK_API_URL`, `DEEPSEEK_MODEL`,
/// `UPSTREAM_TIMEOUT_SECS`.
pub fn upstream_from_lookup<F>(lookup: F) -> Result<UpstreamConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str, default: Option<&str>| -> Result<String, AppError> {
        match lookup(key).filter(|v| !v.is_empty()) {
            Some(val) => Ok(val),
            None => default.map(str::to_string).ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
            }),
        }
    };

    let timeout_secs = get(
        "UPSTREAM_TIMEOUT_SECS",
        Some(&DEFAULT_TIMEOUT_SECS.to_string()),
    )?;
    let timeout_secs = timeout_secs.parse::<u64>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got '{}': {}",
            timeout_secs,
            e
        ))
    })?;

    Ok(UpstreamConfig {
        api_url: get("DEEPSEEK_API_URL", Some(DEFAULT_API_URL))?,
        model: get("DEEPSEEK_MODEL", Some(DEFAULT_MODEL))?,
        api_key: Secret::new(get("DEEPSEEK_API_KEY", None)?),
        timeout_secs,
    })
}
