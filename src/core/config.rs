use super::currency::CurrencyCode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_OPEN_ER_API_URL: &str = "https://open.er-api.com/v6/latest";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OpenErApiConfig {
    pub base_url: String,
    /// Request timeout. Unset means wait for the provider indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl OpenErApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for OpenErApiConfig {
    fn default() -> Self {
        OpenErApiConfig {
            base_url: DEFAULT_OPEN_ER_API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub open_er_api: OpenErApiConfig,
}

/// Currencies preselected when none are given.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            from: CurrencyCode::Usd,
            to: CurrencyCode::Rub,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// if no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  open_er_api:
    base_url: "http://example.com/latest"
    timeout_secs: 5
defaults:
  from: EUR
  to: GBP
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.open_er_api.base_url,
            "http://example.com/latest"
        );
        assert_eq!(
            config.providers.open_er_api.timeout(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.defaults.from, CurrencyCode::Eur);
        assert_eq!(config.defaults.to, CurrencyCode::Gbp);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.providers.open_er_api.base_url,
            "https://open.er-api.com/v6/latest"
        );
        assert!(config.providers.open_er_api.timeout().is_none());
        assert_eq!(config.defaults.from, CurrencyCode::Usd);
        assert_eq!(config.defaults.to, CurrencyCode::Rub);

        let config: AppConfig = serde_yaml::from_str(
            r#"
providers:
  open_er_api:
    base_url: "http://localhost:8080"
"#,
        )
        .unwrap();
        assert!(config.providers.open_er_api.timeout_secs.is_none());
        assert_eq!(config.defaults, DefaultsConfig::default());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let result = serde_yaml::from_str::<AppConfig>(
            r#"
defaults:
  from: XYZ
  to: USD
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
