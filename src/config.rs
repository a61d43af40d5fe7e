use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "DOCDESK_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Extract(#[from] figment::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub links: LinksConfig,
    pub detail_page: DetailPageConfig,
    pub tui: TuiConfig,
}

/// Document service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service origin, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// How document links are built from the listing's `document_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Storage prefix joined to relative URLs. `None` uses URLs verbatim.
    pub prefix: Option<String>,
}

/// Single-document view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailPageConfig {
    /// Email sent with detail requests. This is a placeholder, not the
    /// session email.
    pub email: String,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// How many ticks a notification stays on screen.
    pub notification_ttl_ticks: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for DetailPageConfig {
    fn default() -> Self {
        Self {
            email: "user@example.com".to_string(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            notification_ttl_ticks: 100,
        }
    }
}

impl AppConfig {
    /// Defaults, then `~/.config/docdesk/config.toml`, then `DOCDESK_*`
    /// environment variables (`__` separates sections).
    pub fn figment() -> Figment {
        Self::figment_from(Self::config_path())
    }

    pub fn figment_from(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Load configuration, falling back to defaults when it cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => {
                log::info!("Loaded config (file: {})", Self::config_path().display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("docdesk").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.links.prefix.is_none());
        assert_eq!(config.detail_page.email, "user@example.com");
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert_eq!(config.tui.notification_ttl_ticks, 100);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config: AppConfig = AppConfig::figment_from("does-not-exist.toml").extract()?;
            assert_eq!(config.api.base_url, "http://localhost:8000");
            Ok(())
        });
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [api]
                base_url = "https://docs.internal:9000"

                [links]
                prefix = "https://s3.amazonaws.com/bucket/"
                "#,
            )?;
            let config: AppConfig = AppConfig::figment_from("config.toml").extract()?;
            assert_eq!(config.api.base_url, "https://docs.internal:9000");
            assert_eq!(config.api.timeout_secs, 60);
            assert_eq!(
                config.links.prefix.as_deref(),
                Some("https://s3.amazonaws.com/bucket/")
            );
            assert_eq!(config.detail_page.email, "user@example.com");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[api]\nbase_url = \"http://file:1\"\n")?;
            jail.set_env("DOCDESK_API__BASE_URL", "http://env:2");
            jail.set_env("DOCDESK_DETAIL_PAGE__EMAIL", "someone@corp.com");
            let config: AppConfig = AppConfig::figment_from("config.toml").extract()?;
            assert_eq!(config.api.base_url, "http://env:2");
            assert_eq!(config.detail_page.email, "someone@corp.com");
            Ok(())
        });
    }

    #[test]
    fn test_bad_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[api]\ntimeout_secs = \"soon\"\n")?;
            let result = AppConfig::figment_from("config.toml").extract::<AppConfig>();
            assert!(result.is_err());
            Ok(())
        });
    }
}
