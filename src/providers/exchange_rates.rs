use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

use crate::core::config::ExchangeRatesConfig;
use crate::core::currency::CurrencyRateProvider;

/// Client for the `exchangerates_data` API.
///
/// The API quotes foreign currencies per unit of the base currency; rates are
/// inverted so the result reads as "base currency per unit of foreign".
pub struct ExchangeRatesProvider {
    base_url: String,
    base_currency: String,
    api_key: Option<String>,
}

impl ExchangeRatesProvider {
    pub fn new(config: &ExchangeRatesConfig) -> Self {
        ExchangeRatesProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            base_currency: config.base_currency.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    rates: BTreeMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRatesProvider {
    #[instrument(
        name = "ExchangeRatesFetch",
        skip(self),
        fields(base = %self.base_currency)
    )]
    async fn get_rates(&self, currencies: &BTreeSet<String>) -> Result<BTreeMap<String, f64>> {
        if currencies.is_empty() {
            return Ok(BTreeMap::new());
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("API key for exchange rates is not configured"))?;

        let symbols = currencies.iter().cloned().collect::<Vec<_>>().join(",");
        let url = reqwest::Url::parse_with_params(
            &format!("{}/exchangerates_data/latest", self.base_url),
            &[
                ("symbols", symbols.as_str()),
                ("base", self.base_currency.as_str()),
            ],
        )?;
        debug!("Requesting currency rates from {}", url);

        let client = reqwest::Client::builder().user_agent("xspend/0.1").build()?;
        let response = client
            .get(url.clone())
            .header("apikey", api_key)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                self.base_currency
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse JSON response for {}: {}",
                self.base_currency,
                e
            )
        })?;

        Ok(data
            .rates
            .into_iter()
            .filter(|(currency, _)| currencies.contains(currency))
            .filter(|(_, rate)| *rate > 0.0)
            .map(|(currency, rate)| (currency, 1.0 / rate))
            .collect())
    }
}
