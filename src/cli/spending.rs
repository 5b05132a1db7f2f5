use super::ui;
use crate::RunOptions;
use crate::core::config::AppConfig;
use crate::core::filter::spending_by_category;
use crate::core::report::ReportKind;
use crate::core::transaction::Transaction;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_spending_table(transactions: &[Transaction]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
        ui::header_cell("Currency"),
        ui::header_cell("Description"),
    ]);

    for t in transactions {
        table.add_row(vec![
            Cell::new(&t.date),
            ui::amount_cell(t.amount),
            Cell::new(&t.currency),
            Cell::new(&t.description),
        ]);
    }

    let total = transactions.iter().fold(0.0, |acc, t| acc + t.amount);
    let label = match transactions.first() {
        Some(t) => format!("Total ({})", t.category),
        None => "Total".to_string(),
    };
    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text(&label, ui::StyleType::TotalLabel),
        ui::style_text(&format!("{total:.2}"), ui::StyleType::TotalValue)
    )
}

pub fn run(
    config: &AppConfig,
    transactions: &[Transaction],
    category: &str,
    date: Option<&str>,
    options: &RunOptions,
) -> Result<String> {
    let selected = spending_by_category(transactions, category, date)?;
    super::emit(
        ReportKind::Spending,
        selected.as_slice(),
        display_spending_table,
        &config.reports_dir,
        options.save.as_ref(),
        options.table,
    )
}
