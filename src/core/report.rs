//! JSON rendering and optional persistence of reports.
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report kinds, used to name files saved without an explicit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Cashback,
    Spending,
}

impl ReportKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary.json",
            ReportKind::Cashback => "cashback_by_category.json",
            ReportKind::Spending => "spending_by_category.json",
        }
    }

    pub fn default_path(&self, reports_dir: &Path) -> PathBuf {
        reports_dir.join(self.file_name())
    }
}

/// Serializes `report` with 4-space indentation. Non-ASCII text is written as is.
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    report
        .serialize(&mut serializer)
        .context("Failed to serialize report")?;
    String::from_utf8(buf).context("Report is not valid UTF-8")
}

/// Writes an already rendered report to `path`, creating parent directories.
pub fn save_report(path: &Path, json: &str) -> Result<()> {
    write_with_parents(path, json, "report")?;
    info!("Saved report to {}", path.display());
    Ok(())
}

/// Writes `contents` to `path`, creating missing parent directories first.
/// `what` names the file in error messages.
pub(crate) fn write_with_parents(path: &Path, contents: &str, what: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write {what} to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::{CardSummary, TopTransaction};
    use crate::core::price::StockPrice;
    use crate::core::summary::SummaryReport;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_to_json_uses_four_spaces_and_keeps_unicode() -> Result<()> {
        let report = BTreeMap::from([("Супермаркеты".to_string(), 12.5)]);
        let json = to_json(&report)?;
        assert_eq!(json, "{\n    \"Супермаркеты\": 12.5\n}");
        Ok(())
    }

    #[test]
    fn test_round_trip_preserves_values() -> Result<()> {
        let cards = vec![
            CardSummary {
                last_digits: "7197".to_string(),
                total_spent: -224.89,
                cashback: 2.0,
            },
            CardSummary {
                last_digits: "4556".to_string(),
                total_spent: 1000.0,
                cashback: 10.0,
            },
        ];
        let json = to_json(&cards)?;
        let parsed: Vec<CardSummary> = serde_json::from_str(&json)?;
        assert_eq!(parsed, cards);

        let as_value: Value = serde_json::from_str(&json)?;
        assert_eq!(as_value, serde_json::to_value(&cards)?);
        Ok(())
    }

    #[test]
    fn test_summary_round_trip_keeps_inverted_rates() -> Result<()> {
        let report = SummaryReport {
            greeting: "Добрый день".to_string(),
            cards: vec![CardSummary {
                last_digits: "7197".to_string(),
                total_spent: -1820.5,
                cashback: 18.0,
            }],
            top_transactions: vec![TopTransaction {
                date: "31.07.2020 18:30:00".to_string(),
                amount: -1500.0,
                category: "Супермаркеты".to_string(),
                description: "Магнит".to_string(),
            }],
            currency_rates: BTreeMap::from([
                ("EUR".to_string(), 1.0 / 0.00952),
                ("USD".to_string(), 1.0 / 0.0103),
            ]),
            stock_prices: vec![StockPrice {
                stock: "AAPL".to_string(),
                price: 222.83,
            }],
        };
        let json = to_json(&report)?;
        let parsed: SummaryReport = serde_json::from_str(&json)?;
        assert_eq!(parsed, report);
        assert_eq!(parsed.currency_rates["USD"], 97.08737864077669);
        Ok(())
    }

    #[test]
    fn test_save_report_creates_directories() -> Result<()> {
        let dir = TempDir::new()?;
        let path = ReportKind::Spending.default_path(&dir.path().join("reports"));
        save_report(&path, "[]")?;
        assert_eq!(fs::read_to_string(&path)?, "[]");
        assert!(path.ends_with("reports/spending_by_category.json"));
        Ok(())
    }
}
