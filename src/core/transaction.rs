//! Bank operation records and the timestamp format they are exported with

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Literal format of the operation timestamp, e.g. `31.12.2021 16:44:00`.
pub const DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// A single row of the operations export.
///
/// The timestamp is kept as the string found in the file. Use
/// [`Transaction::operation_time`] to get the parsed value; rows whose
/// timestamp does not match [`DATE_FORMAT`] have no operation time and are
/// left out of every date-bounded query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub cashback: Option<f64>,
}

impl Transaction {
    pub fn operation_time(&self) -> Option<NaiveDateTime> {
        parse_operation_time(&self.date)
    }

    /// Returns a copy carrying `time` rendered back into [`DATE_FORMAT`].
    pub(crate) fn with_operation_time(&self, time: &NaiveDateTime) -> Self {
        Self {
            date: format_operation_time(time),
            ..self.clone()
        }
    }
}

pub fn parse_operation_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_operation_time(time: &NaiveDateTime) -> String {
    time.format(DATE_FORMAT).to_string()
}
