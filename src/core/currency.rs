//! Currency rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Returns the cost of one unit of each requested currency, expressed in
    /// the provider's base currency.
    async fn get_rates(&self, currencies: &BTreeSet<String>) -> Result<BTreeMap<String, f64>>;
}

/// Fetches rates for `currencies`, returning an empty map when the provider
/// fails.
pub async fn rates_or_empty(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    currencies: &BTreeSet<String>,
) -> BTreeMap<String, f64> {
    match provider.get_rates(currencies).await {
        Ok(rates) => rates,
        Err(e) => {
            warn!(error = %e, "Failed to fetch currency rates");
            BTreeMap::new()
        }
    }
}
