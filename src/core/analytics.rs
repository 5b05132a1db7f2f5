//! Aggregations over a list of operations: per-card totals, the largest
//! operations and cashback per category.
use crate::core::transaction::Transaction;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Number of operations shown on the dashboard.
pub const TOP_TRANSACTIONS: usize = 5;

/// Spend in currency units that earns one unit of cashback.
pub const CASHBACK_STEP: f64 = 100.0;

/// Spending and cashback on a single card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// An operation reduced to the fields shown in the top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTransaction {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl From<&Transaction> for TopTransaction {
    fn from(t: &Transaction) -> Self {
        TopTransaction {
            date: t.date.clone(),
            amount: t.amount,
            category: t.category.clone(),
            description: t.description.clone(),
        }
    }
}

/// One unit of cashback for every full [`CASHBACK_STEP`] spent. The sign of
/// `total` is ignored, so refunds and spends of the same size earn the same.
pub fn cashback_for(total: f64) -> f64 {
    (total.abs() / CASHBACK_STEP).floor()
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums operations per card number. Cards are ordered by number; operations
/// without a card are not attributed to any card.
pub fn card_summaries(transactions: &[Transaction]) -> Vec<CardSummary> {
    info!("Grouping operations by card number");
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for t in transactions {
        match t.card_number.as_deref() {
            Some(card) => *totals.entry(card).or_default() += t.amount,
            None => debug!(date = %t.date, "Operation has no card number"),
        }
    }

    let cards: Vec<CardSummary> = totals
        .into_iter()
        .map(|(card, total)| CardSummary {
            last_digits: last_digits(card),
            total_spent: round_to_cents(total),
            cashback: cashback_for(total),
        })
        .collect();
    info!(count = cards.len(), "Card summaries ready");
    cards
}

fn last_digits(card: &str) -> String {
    let chars: Vec<char> = card.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}

/// Returns the `n` operations with the largest amount, largest first.
/// Operations with equal amounts keep their input order.
pub fn top_transactions(transactions: &[Transaction], n: usize) -> Vec<TopTransaction> {
    info!(n, "Selecting top operations by amount");
    let mut ranked: Vec<&Transaction> = transactions.iter().collect();
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranked.into_iter().take(n).map(TopTransaction::from).collect()
}

/// Totals the cashback column per category for operations made in the given
/// month. A missing cashback value counts as zero. Operations without a
/// category are not attributed to any group.
pub fn cashback_by_category(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> BTreeMap<String, f64> {
    info!(year, month, "Analyzing cashback");
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut matched = 0;
    for t in transactions {
        let Some(time) = t.operation_time() else {
            continue;
        };
        if time.year() != year || time.month() != month || t.category.is_empty() {
            continue;
        }
        matched += 1;
        *by_category.entry(t.category.clone()).or_default() += t.cashback.unwrap_or(0.0);
    }
    info!(
        operations = matched,
        categories = by_category.len(),
        "Cashback analysis finished"
    );
    by_category
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(
        date: &str,
        amount: f64,
        category: &str,
        description: &str,
        card: Option<&str>,
        cashback: Option<f64>,
    ) -> Transaction {
        Transaction {
            date: date.to_string(),
            amount,
            currency: "RUB".to_string(),
            category: category.to_string(),
            description: description.to_string(),
            card_number: card.map(str::to_string),
            cashback,
        }
    }

    fn trans_data() -> Vec<Transaction> {
        vec![
            transaction(
                "01.01.2023 00:00:00",
                100.0,
                "продукты",
                "магазин",
                Some("1234123412341234"),
                Some(1.0),
            ),
            transaction(
                "01.02.2023 00:00:00",
                150.0,
                "развлечения",
                "кинотеатр",
                Some("5678567856785678"),
                Some(1.5),
            ),
        ]
    }

    #[test]
    fn test_cashback_for() {
        assert_eq!(cashback_for(1000.0), 10.0);
        assert_eq!(cashback_for(99.0), 0.0);
        assert_eq!(cashback_for(199.99), 1.0);
        assert_eq!(cashback_for(-250.0), 2.0);
        assert_eq!(cashback_for(0.0), 0.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(10.004), 10.0);
        assert_eq!(round_to_cents(-160.894), -160.89);
        assert_eq!(round_to_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_card_summaries() {
        let cards = card_summaries(&trans_data());
        assert_eq!(
            cards,
            vec![
                CardSummary {
                    last_digits: "1234".to_string(),
                    total_spent: 100.0,
                    cashback: 1.0,
                },
                CardSummary {
                    last_digits: "5678".to_string(),
                    total_spent: 150.0,
                    cashback: 1.0,
                },
            ]
        );
    }

    #[test]
    fn test_card_totals_add_up() {
        let transactions = vec![
            transaction("01.01.2023 10:00:00", -160.89, "a", "", Some("*7197"), None),
            transaction("02.01.2023 10:00:00", -64.0, "a", "", Some("*7197"), None),
            transaction("03.01.2023 10:00:00", -1000.5, "b", "", Some("*4556"), None),
            transaction("04.01.2023 10:00:00", 300.25, "c", "", Some("*5091"), None),
            transaction("05.01.2023 10:00:00", -20.0, "c", "", Some("*4556"), None),
        ];
        let cards = card_summaries(&transactions);
        assert_eq!(cards.len(), 3);

        let expected: f64 = transactions.iter().map(|t| t.amount).sum();
        let actual: f64 = cards.iter().map(|c| c.total_spent).sum();
        assert!((expected - actual).abs() < 0.01);

        let card = cards.iter().find(|c| c.last_digits == "7197").unwrap();
        assert_eq!(card.total_spent, -224.89);
        assert_eq!(card.cashback, 2.0);
        let card = cards.iter().find(|c| c.last_digits == "4556").unwrap();
        assert_eq!(card.cashback, 10.0);
    }

    #[test]
    fn test_operations_without_card_are_skipped() {
        let transactions = vec![
            transaction("01.01.2023 10:00:00", 500.0, "a", "", None, None),
            transaction("01.01.2023 10:00:00", 50.0, "a", "", Some("*12"), None),
        ];
        let cards = card_summaries(&transactions);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].last_digits, "*12");
        assert_eq!(cards[0].total_spent, 50.0);
    }

    #[test]
    fn test_top_transactions_with_fewer_rows() {
        let top = top_transactions(&trans_data(), TOP_TRANSACTIONS);
        assert_eq!(
            top,
            vec![
                TopTransaction {
                    date: "01.02.2023 00:00:00".to_string(),
                    amount: 150.0,
                    category: "развлечения".to_string(),
                    description: "кинотеатр".to_string(),
                },
                TopTransaction {
                    date: "01.01.2023 00:00:00".to_string(),
                    amount: 100.0,
                    category: "продукты".to_string(),
                    description: "магазин".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_top_transactions_keeps_input_order_on_ties() {
        let transactions: Vec<Transaction> = [10.0, 50.0, 30.0, 50.0, 20.0, 30.0, 5.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, amount)| transaction("", *amount, "", &format!("op{i}"), None, None))
            .collect();

        let top = top_transactions(&transactions, TOP_TRANSACTIONS);
        let descriptions: Vec<&str> = top.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["op1", "op3", "op2", "op5", "op7"]);
    }

    #[test]
    fn test_cashback_by_category() {
        let result = cashback_by_category(&trans_data(), 2023, 1);
        assert_eq!(result, BTreeMap::from([("продукты".to_string(), 1.0)]));

        let result = cashback_by_category(&trans_data(), 2023, 2);
        assert_eq!(result, BTreeMap::from([("развлечения".to_string(), 1.5)]));
    }

    #[test]
    fn test_cashback_by_category_sums_groups() {
        let transactions = vec![
            transaction("03.11.2021 10:00:00", -500.0, "Супермаркеты", "", None, Some(5.0)),
            transaction("04.11.2021 10:00:00", -300.0, "Супермаркеты", "", None, Some(3.0)),
            transaction("05.11.2021 10:00:00", -90.0, "Супермаркеты", "", None, None),
            transaction("06.11.2021 10:00:00", -1200.0, "Топливо", "", None, Some(12.0)),
            transaction("06.12.2021 10:00:00", -1200.0, "Топливо", "", None, Some(12.0)),
            transaction("06.11.2020 10:00:00", -1200.0, "Топливо", "", None, Some(12.0)),
            transaction("11/06/2021", -1200.0, "Топливо", "", None, Some(12.0)),
        ];
        let result = cashback_by_category(&transactions, 2021, 11);
        assert_eq!(result.len(), 2);
        assert_eq!(result["Супермаркеты"], 8.0);
        assert_eq!(result["Топливо"], 12.0);
    }

    #[test]
    fn test_cashback_by_category_skips_blank_category() {
        let transactions = vec![
            transaction("03.11.2021 10:00:00", -500.0, "Супермаркеты", "", None, Some(5.0)),
            transaction("04.11.2021 10:00:00", -300.0, "", "", None, Some(3.0)),
        ];
        let result = cashback_by_category(&transactions, 2021, 11);
        assert_eq!(result, BTreeMap::from([("Супермаркеты".to_string(), 5.0)]));
    }

    #[test]
    fn test_cashback_by_category_empty_month() {
        assert!(cashback_by_category(&trans_data(), 2024, 1).is_empty());
    }
}
