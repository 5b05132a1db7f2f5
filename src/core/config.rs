use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

pub const DEFAULT_EXCHANGE_RATES_URL: &str = "https://api.apilayer.com";
pub const DEFAULT_STOCKS_URL: &str = "https://financialmodelingprep.com";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeRatesConfig {
    pub base_url: String,
    /// Currency the rates are quoted against.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StocksConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub exchange_rates: Option<ExchangeRatesConfig>,
    pub stocks: Option<StocksConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rates: Some(ExchangeRatesConfig {
                base_url: DEFAULT_EXCHANGE_RATES_URL.to_string(),
                base_currency: default_base_currency(),
                api_key: None,
            }),
            stocks: Some(StocksConfig {
                base_url: DEFAULT_STOCKS_URL.to_string(),
                api_key: None,
            }),
        }
    }
}

impl ProvidersConfig {
    /// Exchange rate settings, falling back to the public endpoint.
    pub fn exchange_rates_or_default(&self) -> ExchangeRatesConfig {
        self.exchange_rates.clone().unwrap_or(ExchangeRatesConfig {
            base_url: DEFAULT_EXCHANGE_RATES_URL.to_string(),
            base_currency: default_base_currency(),
            api_key: None,
        })
    }

    /// Stock listing settings, falling back to the public endpoint.
    pub fn stocks_or_default(&self) -> StocksConfig {
        self.stocks.clone().unwrap_or(StocksConfig {
            base_url: DEFAULT_STOCKS_URL.to_string(),
            api_key: None,
        })
    }
}

fn default_base_currency() -> String {
    "RUB".to_string()
}

fn default_operations_path() -> PathBuf {
    PathBuf::from("data/operations.xlsx")
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("user_settings.json")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_operations_path")]
    pub operations_path: PathBuf,
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            operations_path: default_operations_path(),
            settings_path: default_settings_path(),
            reports_dir: default_reports_dir(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the platform config directory. Without a config
    /// file the defaults are used, which resolve paths against the working
    /// directory.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            info!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "xspend", "xspend")
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
operations_path: "/data/operations.xlsx"
settings_path: "/data/user_settings.json"
reports_dir: "/data/reports"
providers:
  exchange_rates:
    base_url: "http://example.com/rates"
    base_currency: "EUR"
    api_key: "secret"
  stocks:
    base_url: "http://example.com/stocks"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.operations_path, PathBuf::from("/data/operations.xlsx"));
        assert_eq!(config.settings_path, PathBuf::from("/data/user_settings.json"));
        assert_eq!(config.reports_dir, PathBuf::from("/data/reports"));

        let rates = config.providers.exchange_rates.unwrap();
        assert_eq!(rates.base_url, "http://example.com/rates");
        assert_eq!(rates.base_currency, "EUR");
        assert_eq!(rates.api_key.as_deref(), Some("secret"));

        let stocks = config.providers.stocks.unwrap();
        assert_eq!(stocks.base_url, "http://example.com/stocks");
        assert!(stocks.api_key.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.providers.exchange_rates_or_default().base_url,
            DEFAULT_EXCHANGE_RATES_URL
        );
        assert_eq!(
            config.providers.exchange_rates_or_default().base_currency,
            "RUB"
        );
        assert_eq!(config.providers.stocks_or_default().base_url, DEFAULT_STOCKS_URL);
    }

    #[test]
    fn test_partial_providers() {
        let yaml_str = r#"
providers:
  exchange_rates:
    base_url: "http://localhost:8080"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.providers.stocks.is_none());
        assert_eq!(
            config.providers.stocks_or_default().base_url,
            DEFAULT_STOCKS_URL
        );
        assert_eq!(
            config.providers.exchange_rates_or_default().base_currency,
            "RUB"
        );
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("missing/config.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
