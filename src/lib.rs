pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, ExchangeRatesConfig, StocksConfig};
use crate::core::statement::load_transactions;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Dashboard for the month containing `date` (`dd.mm.yyyy HH:MM:SS`).
    Summary { date: String },
    /// Cashback per category for one month.
    Cashback { year: i32, month: u32 },
    /// Operations of one category over the trailing three months.
    Spending {
        category: String,
        date: Option<String>,
    },
}

/// Where to persist a rendered report.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveTarget {
    /// A per-report file name inside the configured reports directory.
    Default,
    Path(PathBuf),
}

/// Command line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub operations_path: Option<PathBuf>,
    pub save: Option<SaveTarget>,
    pub table: bool,
    pub currency_api_key: Option<String>,
    pub stocks_api_key: Option<String>,
}

impl RunOptions {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.operations_path {
            config.operations_path = path.clone();
        }
        if let Some(key) = &self.currency_api_key {
            config.providers.exchange_rates = Some(ExchangeRatesConfig {
                api_key: Some(key.clone()),
                ..config.providers.exchange_rates_or_default()
            });
        }
        if let Some(key) = &self.stocks_api_key {
            config.providers.stocks = Some(StocksConfig {
                api_key: Some(key.clone()),
                ..config.providers.stocks_or_default()
            });
        }
    }
}

/// Runs one report and returns its JSON text.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: &RunOptions,
) -> Result<String> {
    info!("xspend starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    options.apply(&mut config);
    debug!(
        operations = %config.operations_path.display(),
        settings = %config.settings_path.display(),
        "Using configuration"
    );

    let transactions = load_transactions(&config.operations_path)?;

    match command {
        AppCommand::Summary { date } => {
            cli::summary::run(&config, &transactions, &date, options).await
        }
        AppCommand::Cashback { year, month } => {
            cli::cashback::run(&config, &transactions, year, month, options)
        }
        AppCommand::Spending { category, date } => {
            cli::spending::run(&config, &transactions, &category, date.as_deref(), options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_config() {
        let mut config = AppConfig::default();
        let options = RunOptions {
            operations_path: Some(PathBuf::from("/tmp/ops.csv")),
            currency_api_key: Some("rates-key".to_string()),
            stocks_api_key: Some("stocks-key".to_string()),
            ..RunOptions::default()
        };
        options.apply(&mut config);

        assert_eq!(config.operations_path, PathBuf::from("/tmp/ops.csv"));
        let rates = config.providers.exchange_rates_or_default();
        assert_eq!(rates.api_key.as_deref(), Some("rates-key"));
        assert_eq!(rates.base_currency, "RUB");
        assert_eq!(
            config.providers.stocks_or_default().api_key.as_deref(),
            Some("stocks-key")
        );
    }

    #[test]
    fn test_options_keep_config_without_overrides() {
        let mut config = AppConfig::default();
        RunOptions::default().apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}
