//! Date-bounded selections over the operations table.
//!
//! Both filters keep input order and re-render the timestamp of every
//! selected row from its parsed value. Rows without a parseable timestamp
//! never match.
use crate::core::transaction::{DATE_FORMAT, Transaction};
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

/// Length of the trailing window used by [`spending_by_category`].
pub const SPENDING_WINDOW_MONTHS: u32 = 3;

const DAY_FORMAT: &str = "%d.%m.%Y";

/// Selects operations made in the same calendar month and year as
/// `reference`, a timestamp such as `15.11.2024 00:00:00`.
pub fn filter_by_month(transactions: &[Transaction], reference: &str) -> Result<Vec<Transaction>> {
    info!(%reference, "Filtering operations by month");
    let reference = NaiveDateTime::parse_from_str(reference.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid reference date: {reference}"))?;

    let selected = select(transactions, |time| {
        time.year() == reference.year() && time.month() == reference.month()
    });
    info!(count = selected.len(), "Month filter finished");
    Ok(selected)
}

/// Selects operations of `category` within the trailing three-month window
/// ending at `date`.
///
/// `date` is either `dd.mm.yyyy` (meaning midnight of that day) or a full
/// timestamp. Without a date the window ends at the current local time.
pub fn spending_by_category(
    transactions: &[Transaction],
    category: &str,
    date: Option<&str>,
) -> Result<Vec<Transaction>> {
    let end = match date {
        Some(date) => parse_reference_date(date)?,
        None => Local::now().naive_local(),
    };
    Ok(spending_by_category_until(transactions, category, end))
}

/// Same as [`spending_by_category`] with an explicit window end.
pub fn spending_by_category_until(
    transactions: &[Transaction],
    category: &str,
    end: NaiveDateTime,
) -> Vec<Transaction> {
    let start = months_before(end, SPENDING_WINDOW_MONTHS);
    info!(%category, %start, %end, "Selecting spending by category");

    let selected: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.category == category)
        .filter_map(|t| {
            let time = t.operation_time()?;
            (start <= time && time <= end).then(|| t.with_operation_time(&time))
        })
        .collect();
    info!(count = selected.len(), "Spending selection finished");
    selected
}

/// Moves `time` back by whole calendar months, keeping the day of month and
/// clamping it to the end of shorter months.
pub fn months_before(time: NaiveDateTime, months: u32) -> NaiveDateTime {
    time.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Parses a user supplied reference date: `dd.mm.yyyy` or a full timestamp.
pub fn parse_reference_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(time) = NaiveDateTime::parse_from_str(value, DATE_FORMAT) {
        return Ok(time);
    }
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("Invalid date {value:?}, expected dd.mm.yyyy"))
}

fn select(
    transactions: &[Transaction],
    predicate: impl Fn(&NaiveDateTime) -> bool,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter_map(|t| match t.operation_time() {
            Some(time) if predicate(&time) => Some(t.with_operation_time(&time)),
            Some(_) => None,
            None => {
                debug!(date = %t.date, "Skipping operation with unparseable date");
                None
            }
        })
        .collect()
}
