//! Dashboard summary for a single month of operations.
use crate::core::analytics::{
    CardSummary, TOP_TRANSACTIONS, TopTransaction, card_summaries, top_transactions,
};
use crate::core::currency::{CurrencyRateProvider, rates_or_empty};
use crate::core::filter::filter_by_month;
use crate::core::greeting::Greeting;
use crate::core::price::{StockPrice, StockPriceProvider, prices_or_empty};
use crate::core::settings::UserSettings;
use crate::core::transaction::Transaction;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: BTreeMap<String, f64>,
    pub stock_prices: Vec<StockPrice>,
}

/// Builds the dashboard for the month containing `reference`.
///
/// `now` only drives the greeting. Failing rate providers leave their
/// sections empty instead of failing the summary.
#[instrument(skip_all, fields(reference = %reference))]
pub async fn build_summary(
    reference: &str,
    transactions: &[Transaction],
    settings: &UserSettings,
    currency_provider: &(dyn CurrencyRateProvider + Send + Sync),
    stock_provider: &(dyn StockPriceProvider + Send + Sync),
    now: NaiveDateTime,
) -> Result<SummaryReport> {
    let greeting = Greeting::at(&now);
    let month = filter_by_month(transactions, reference)?;
    let cards = card_summaries(&month);
    let top = top_transactions(&month, TOP_TRANSACTIONS);

    let (currency_rates, stock_prices) = futures::join!(
        rates_or_empty(currency_provider, &settings.user_currencies),
        prices_or_empty(stock_provider, &settings.user_stocks),
    );
    info!(
        cards = cards.len(),
        rates = currency_rates.len(),
        stocks = stock_prices.len(),
        "Summary assembled"
    );

    Ok(SummaryReport {
        greeting: greeting.to_string(),
        cards,
        top_transactions: top,
        currency_rates,
        stock_prices,
    })
}
