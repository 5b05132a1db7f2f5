pub mod exchange_rates;
pub mod stock_list;

pub use exchange_rates::ExchangeRatesProvider;
pub use stock_list::StockListProvider;
