use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use crate::core::config::StocksConfig;
use crate::core::price::{StockPrice, StockPriceProvider};

/// Client for the Financial Modeling Prep stock listing.
pub struct StockListProvider {
    base_url: String,
    api_key: Option<String>,
}

impl StockListProvider {
    pub fn new(config: &StocksConfig) -> Self {
        StockListProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ListedStock {
    symbol: String,
    price: Option<f64>,
}

#[async_trait]
impl StockPriceProvider for StockListProvider {
    #[instrument(name = "StockListFetch", skip(self))]
    async fn fetch_prices(&self, symbols: &BTreeSet<String>) -> Result<Vec<StockPrice>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("API key for stock prices is not configured"))?;

        let endpoint = format!("{}/api/v3/stock/list", self.base_url);
        debug!("Requesting stock list from {}", endpoint);
        let url = reqwest::Url::parse_with_params(&endpoint, &[("apikey", api_key)])?;

        let client = reqwest::Client::builder().user_agent("xspend/0.1").build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, endpoint))?;

        debug!(status = %response.status(), "Received stock list response");
        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for stock list", response.status()));
        }

        let text = response.text().await?;
        let listed: Vec<ListedStock> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for stock list: {}", e))?;

        let prices: Vec<StockPrice> = listed
            .into_iter()
            .filter(|s| symbols.contains(&s.symbol))
            .filter_map(|s| {
                s.price.map(|price| StockPrice {
                    stock: s.symbol,
                    price,
                })
            })
            .collect();
        debug!(count = prices.len(), "Matched monitored stocks");
        Ok(prices)
    }
}
