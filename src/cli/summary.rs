use super::ui;
use crate::RunOptions;
use crate::core::config::AppConfig;
use crate::core::report::ReportKind;
use crate::core::settings::UserSettings;
use crate::core::summary::{SummaryReport, build_summary};
use crate::core::transaction::Transaction;
use crate::providers::{ExchangeRatesProvider, StockListProvider};
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;

impl SummaryReport {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "{}\n\n",
            ui::style_text(&self.greeting, ui::StyleType::Title)
        );

        let mut cards = ui::new_styled_table();
        cards.set_header(vec![
            ui::header_cell("Card"),
            ui::header_cell("Total spent"),
            ui::header_cell("Cashback"),
        ]);
        for card in &self.cards {
            cards.add_row(vec![
                Cell::new(&card.last_digits),
                ui::amount_cell(card.total_spent),
                ui::number_cell(card.cashback),
            ]);
        }
        if self.cards.is_empty() {
            cards.add_row(vec![ui::empty_cell("No card operations this month")]);
        }
        output.push_str(&cards.to_string());

        let mut top = ui::new_styled_table();
        top.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Amount"),
            ui::header_cell("Category"),
            ui::header_cell("Description"),
        ]);
        for t in &self.top_transactions {
            top.add_row(vec![
                Cell::new(&t.date),
                ui::amount_cell(t.amount),
                Cell::new(&t.category),
                Cell::new(&t.description),
            ]);
        }
        output.push_str(&format!(
            "\n\n{}\n{}",
            ui::style_text("Top operations", ui::StyleType::TotalLabel),
            top
        ));

        let mut market = ui::new_styled_table();
        market.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Price")]);
        for (currency, rate) in &self.currency_rates {
            market.add_row(vec![Cell::new(currency), ui::number_cell(*rate)]);
        }
        for stock in &self.stock_prices {
            market.add_row(vec![Cell::new(&stock.stock), ui::number_cell(stock.price)]);
        }
        if self.currency_rates.is_empty() && self.stock_prices.is_empty() {
            market.add_row(vec![ui::empty_cell("Rates unavailable")]);
        }
        output.push_str(&format!(
            "\n\n{}\n{}",
            ui::style_text("Currencies and stocks", ui::StyleType::TotalLabel),
            market
        ));

        output
    }
}

pub async fn run(
    config: &AppConfig,
    transactions: &[Transaction],
    date: &str,
    options: &RunOptions,
) -> Result<String> {
    let settings = UserSettings::load_from_path(&config.settings_path)?;
    let currency_provider =
        ExchangeRatesProvider::new(&config.providers.exchange_rates_or_default());
    let stock_provider = StockListProvider::new(&config.providers.stocks_or_default());

    let pb = ui::new_spinner("Fetching currency rates and stock prices...");
    let report = build_summary(
        date,
        transactions,
        &settings,
        &currency_provider,
        &stock_provider,
        Local::now().naive_local(),
    )
    .await;
    pb.finish_and_clear();

    super::emit(
        ReportKind::Summary,
        &report?,
        SummaryReport::display_as_table,
        &config.reports_dir,
        options.save.as_ref(),
        options.table,
    )
}
