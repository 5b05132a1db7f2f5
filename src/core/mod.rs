//! Core business logic abstractions

pub mod analytics;
pub mod config;
pub mod currency;
pub mod error;
pub mod filter;
pub mod greeting;
pub mod log;
pub mod price;
pub mod report;
pub mod settings;
pub mod statement;
pub mod summary;
pub mod transaction;

// Re-export main types for cleaner imports
pub use currency::CurrencyRateProvider;
pub use error::StatementError;
pub use price::{StockPrice, StockPriceProvider};
pub use transaction::Transaction;
