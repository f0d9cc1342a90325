//! Application configuration.
//!
//! Layered: built-in defaults, then an optional YAML file, then
//! `OUTAGE_SYNC__*` environment variables. A double underscore separates
//! nesting levels, e.g. `OUTAGE_SYNC__API__API_KEY` overrides `api.api_key`.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use outage_api::ApiConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "OUTAGE_SYNC__";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Outage service client settings.
    pub api: ApiConfig,
    /// Target-site and filtering settings.
    pub sync: SyncConfig,
    /// Logging output settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load layered configuration: defaults, then the YAML file (if given),
    /// then environment variables.
    ///
    /// # Errors
    /// Returns an error when a layer contains unknown or ill-typed fields.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = config_file {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// Render the effective configuration as pretty JSON. The API key is
    /// redacted by its serializer and never appears in the output.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_redacted_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}

/// Target-site and filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Site whose registered devices scope the run.
    pub site_id: String,
    /// Outages beginning before this instant are ignored.
    pub min_begin: DateTime<Utc>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            site_id: "norwich-pear-tree".to_owned(),
            min_begin: default_min_begin(),
        }
    }
}

/// Cutoff applied when none is configured: 2022-01-01T00:00:00.000Z.
fn default_min_begin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Logging output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info").
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable line-oriented output.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Keys mutated by other tests; unset them so parallel test runs cannot
    /// leak overrides into each other (temp-env serializes on a global lock).
    const ENV_KEYS: [&str; 2] = ["OUTAGE_SYNC__SYNC__SITE_ID", "OUTAGE_SYNC__API__API_KEY"];

    #[test]
    fn defaults_without_any_layer() {
        temp_env::with_vars_unset(ENV_KEYS, || {
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config.sync.site_id, "norwich-pear-tree");
            assert_eq!(
                config.sync.min_begin.to_rfc3339(),
                "2022-01-01T00:00:00+00:00"
            );
            assert_eq!(config.api.retry.max_attempts, 5);
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.logging.format, LogFormat::Text);
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            concat!(
                "api:\n",
                "  base_url: \"http://localhost:8080\"\n",
                "  retry:\n",
                "    max_attempts: 2\n",
                "sync:\n",
                "  site_id: \"kingfisher\"\n",
                "  min_begin: \"2023-06-01T00:00:00.000Z\"\n",
            )
        )
        .unwrap();

        temp_env::with_vars_unset(ENV_KEYS, || {
            let config = AppConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.api.base_url, "http://localhost:8080");
            assert_eq!(config.api.retry.max_attempts, 2);
            assert_eq!(config.sync.site_id, "kingfisher");
            assert_eq!(
                config.sync.min_begin,
                Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).single().unwrap()
            );
            // Untouched sections keep their defaults.
            assert_eq!(config.api.retry.initial_backoff_ms, 1_000);
        });
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        temp_env::with_vars(
            [
                ("OUTAGE_SYNC__SYNC__SITE_ID", Some("env-site")),
                ("OUTAGE_SYNC__API__API_KEY", Some("env-key")),
            ],
            || {
                let config = AppConfig::load(None).unwrap();
                assert_eq!(config.sync.site_id, "env-site");
                assert_eq!(config.api.api_key.expose(), "env-key");
            },
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sync:\n  unknown_field: 1").unwrap();
        temp_env::with_vars_unset(ENV_KEYS, || {
            assert!(AppConfig::load(Some(file.path())).is_err());
        });
    }

    #[test]
    fn redacted_rendering_hides_the_api_key() {
        temp_env::with_var("OUTAGE_SYNC__API__API_KEY", Some("super-secret"), || {
            let config = AppConfig::load(None).unwrap();
            let rendered = config.to_redacted_json().unwrap();
            assert!(!rendered.contains("super-secret"));
            assert!(rendered.contains("[REDACTED]"));
        });
    }
}
