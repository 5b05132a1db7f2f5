use super::ui;
use crate::RunOptions;
use crate::core::analytics::cashback_by_category;
use crate::core::config::AppConfig;
use crate::core::report::ReportKind;
use crate::core::transaction::Transaction;
use anyhow::{Result, bail};
use comfy_table::Cell;
use std::collections::BTreeMap;

/// Renders category cashback with a total row.
pub fn display_cashback_table(by_category: &BTreeMap<String, f64>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Category"), ui::header_cell("Cashback")]);

    for (category, cashback) in by_category {
        table.add_row(vec![Cell::new(category), ui::number_cell(*cashback)]);
    }
    if by_category.is_empty() {
        table.add_row(vec![ui::empty_cell("No operations in this month")]);
    }

    let total = by_category.values().fold(0.0, |acc, v| acc + v);
    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text("Total cashback", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{total:.2}"), ui::StyleType::TotalValue)
    )
}

pub fn run(
    config: &AppConfig,
    transactions: &[Transaction],
    year: i32,
    month: u32,
    options: &RunOptions,
) -> Result<String> {
    if !(1..=12).contains(&month) {
        bail!("Invalid month {month}, expected 1-12");
    }

    let by_category = cashback_by_category(transactions, year, month);
    super::emit(
        ReportKind::Cashback,
        &by_category,
        display_cashback_table,
        &config.reports_dir,
        options.save.as_ref(),
        options.table,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_cashback_table() {
        let by_category = BTreeMap::from([
            ("Супермаркеты".to_string(), 8.0),
            ("Топливо".to_string(), 12.5),
        ]);
        let table = display_cashback_table(&by_category);
        assert!(table.contains("Супермаркеты"));
        assert!(table.contains("12.50"));
        assert!(table.contains("20.50"));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let result = run(&AppConfig::default(), &[], 2021, 13, &RunOptions::default());
        assert!(result.unwrap_err().to_string().contains("Invalid month 13"));
    }
}
