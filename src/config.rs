use std::collections::HashMap;

use ::config::{Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const ENV_PREFIX: &str = "TRANSLATE_GATEWAY";
const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub google: GoogleConfig,
    #[serde(default)]
    pub httpd: HttpdConfig,
    #[serde(default)]
    pub allowed_keys: Vec<String>,
    #[serde(default)]
    pub sentry: SentryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpdConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryConfig {
    #[serde(default)]
    pub dsn: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default = "default_traces_sample_rate")]
    pub traces_sample_rate: f32,
}

fn default_base_url() -> String {
    DEFAULT_GOOGLE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_traces_sample_rate() -> f32 {
    1.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HttpdConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            traces_sample_rate: default_traces_sample_rate(),
        }
    }
}

impl Config {
    /// Load configuration from `CONFIG_PATH` (or `config/default.*`) and the
    /// process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").ok();
        Self::load_from(path.as_deref(), None)
    }

    /// Layered load: defaults, optional file, prefixed environment, then the
    /// legacy deployment variables (`PROJECT_ID`, `API_KEY`, `PORT`,
    /// `ALLOWED_KEYS`, `SENTRY_DSN`).
    ///
    /// When `env` is `Some`, it replaces the process environment for both
    /// environment layers.
    pub fn load_from(path: Option<&str>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let lookup = |name: &str| -> Option<String> {
            match &env {
                Some(map) => map.get(name).cloned(),
                None => std::env::var(name).ok(),
            }
        };

        let allowed_keys = lookup("ALLOWED_KEYS").map(|raw| split_allowed_keys(&raw));

        let settings = ::config::Config::builder()
            .set_default("google.base_url", DEFAULT_GOOGLE_BASE_URL)?
            .set_default("google.timeout_secs", default_timeout_secs() as i64)?
            .set_default("httpd.host", default_host())?
            .set_default("httpd.port", i64::from(default_port()))?
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(path.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(":")
                    .with_list_parse_key("allowed_keys")
                    .source(env.clone()),
            )
            .set_override_option("google.project_id", lookup("PROJECT_ID"))?
            .set_override_option("google.api_key", lookup("API_KEY"))?
            .set_override_option("httpd.port", lookup("PORT"))?
            .set_override_option("allowed_keys", allowed_keys)?
            .set_override_option("sentry.dsn", lookup("SENTRY_DSN"))?
            .build()
            .context("Failed to assemble configuration sources")?;

        let mut config: Config = settings
            .try_deserialize()
            .context("Invalid configuration (google.project_id and google.api_key are required)")?;
        config.normalize();
        config.validate()?;

        debug!(
            "Configuration resolved: port={}, allowed_keys={}, telemetry={}",
            config.httpd.port,
            config.allowed_keys.len(),
            config.sentry.dsn.is_some()
        );
        Ok(config)
    }

    fn normalize(&mut self) {
        self.allowed_keys.retain(|key| !key.is_empty());
        if self.sentry.dsn.as_deref().map_or(false, |dsn| dsn.trim().is_empty()) {
            self.sentry.dsn = None;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.google.project_id.trim().is_empty() {
            anyhow::bail!("google.project_id must not be empty");
        }
        if self.google.api_key.trim().is_empty() {
            anyhow::bail!("google.api_key must not be empty");
        }
        if self.allowed_keys.is_empty() {
            warn!("allowed_keys is empty; every translation request will be rejected");
        }
        Ok(())
    }
}

/// `ALLOWED_KEYS` is a colon separated list.
fn split_allowed_keys(raw: &str) -> Vec<String> {
    raw.split(':')
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn legacy_variables_populate_config() {
        let config = Config::load_from(
            None,
            env(&[
                ("PROJECT_ID", "demo-project"),
                ("API_KEY", "google-secret"),
                ("PORT", "8080"),
                ("ALLOWED_KEYS", "alpha:beta::gamma"),
                ("SENTRY_DSN", "https://public@o0.ingest.example.io/1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.google.project_id, "demo-project");
        assert_eq!(config.google.api_key, "google-secret");
        assert_eq!(config.google.base_url, DEFAULT_GOOGLE_BASE_URL);
        assert_eq!(config.httpd.port, 8080);
        assert_eq!(config.httpd.host, "0.0.0.0");
        assert_eq!(config.allowed_keys, vec!["alpha", "beta", "gamma"]);
        assert!(config.sentry.dsn.is_some());
    }

    #[test]
    fn defaults_apply_when_optional_values_absent() {
        let config = Config::load_from(
            None,
            env(&[("PROJECT_ID", "p"), ("API_KEY", "k")]),
        )
        .unwrap();

        assert_eq!(config.httpd.port, 3000);
        assert_eq!(config.google.timeout_secs, 30);
        assert!(config.allowed_keys.is_empty());
        assert!(config.sentry.dsn.is_none());
        assert_eq!(config.sentry.traces_sample_rate, 1.0);
    }

    #[test]
    fn blank_dsn_disables_telemetry() {
        let config = Config::load_from(
            None,
            env(&[("PROJECT_ID", "p"), ("API_KEY", "k"), ("SENTRY_DSN", "  ")]),
        )
        .unwrap();
        assert!(config.sentry.dsn.is_none());
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let result = Config::load_from(None, env(&[("PROJECT_ID", "p")]));
        assert!(result.is_err());
    }

    #[test]
    fn split_allowed_keys_drops_empty_segments() {
        assert_eq!(split_allowed_keys(""), Vec::<String>::new());
        assert_eq!(split_allowed_keys("a::b:"), vec!["a", "b"]);
    }
}
