//! Stock price abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

#[async_trait]
pub trait StockPriceProvider: Send + Sync {
    async fn fetch_prices(&self, symbols: &BTreeSet<String>) -> Result<Vec<StockPrice>>;
}

/// Fetches prices for `symbols`, returning an empty list when the provider
/// fails.
pub async fn prices_or_empty(
    provider: &(dyn StockPriceProvider + Send + Sync),
    symbols: &BTreeSet<String>,
) -> Vec<StockPrice> {
    match provider.fetch_prices(symbols).await {
        Ok(prices) => prices,
        Err(e) => {
            warn!(error = %e, "Failed to fetch stock prices");
            Vec::new()
        }
    }
}
