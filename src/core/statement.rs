//! Loads the bank operations export into a list of [`Transaction`]s.
//!
//! Spreadsheets (`.xlsx`, `.xls`, `.ods`) are read from their first worksheet;
//! `.csv` files are read with either `,` or `;` as the delimiter. The first row
//! must hold the column headers.
use crate::core::error::StatementError;
use crate::core::transaction::{Transaction, format_operation_time};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, instrument};

const DATE_COLUMNS: &[&str] = &["Дата операции", "date"];
const AMOUNT_COLUMNS: &[&str] = &["Сумма операции", "amount"];
const CURRENCY_COLUMNS: &[&str] = &["Валюта операции", "Валюта", "currency"];
const CATEGORY_COLUMNS: &[&str] = &["Категория", "category"];
const DESCRIPTION_COLUMNS: &[&str] = &["Описание", "description"];
const CARD_COLUMNS: &[&str] = &["Номер карты", "card_number"];
const CASHBACK_COLUMNS: &[&str] = &["Кэшбэк", "cashback"];

/// A cell value, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e16 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::DateTime(dt) => Some(format_operation_time(dt)),
        }
    }

    /// Finite numeric value of the cell. `NaN` and infinities are errors.
    fn as_number(&self) -> Option<Result<f64, String>> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_finite() => Some(Ok(*n)),
            Cell::Number(n) => Some(Err(n.to_string())),
            Cell::Text(s) => {
                let normalized: String = s
                    .trim()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect();
                if normalized.is_empty() {
                    None
                } else {
                    Some(
                        normalized
                            .parse::<f64>()
                            .ok()
                            .filter(|n| n.is_finite())
                            .ok_or_else(|| s.clone()),
                    )
                }
            }
            Cell::DateTime(dt) => Some(Err(dt.to_string())),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => dt.as_datetime().map_or(Cell::Empty, Cell::DateTime),
            Data::DateTimeIso(s) => s
                .parse::<NaiveDateTime>()
                .map_or_else(|_| Cell::Text(s.clone()), Cell::DateTime),
            Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    date: usize,
    amount: usize,
    currency: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
    card_number: Option<usize>,
    cashback: Option<usize>,
}

impl ColumnMap {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, StatementError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.as_ref().trim() == *n))
        };

        Ok(Self {
            date: find(DATE_COLUMNS).ok_or(StatementError::MissingColumn(DATE_COLUMNS[0]))?,
            amount: find(AMOUNT_COLUMNS).ok_or(StatementError::MissingColumn(AMOUNT_COLUMNS[0]))?,
            currency: find(CURRENCY_COLUMNS),
            category: find(CATEGORY_COLUMNS),
            description: find(DESCRIPTION_COLUMNS),
            card_number: find(CARD_COLUMNS),
            cashback: find(CASHBACK_COLUMNS),
        })
    }

    /// Builds a transaction from one data row. `row` is the 1-based row
    /// number in the file and is used for error reporting only.
    pub fn transaction(&self, row: usize, cells: &[Cell]) -> Result<Transaction, StatementError> {
        let cell = |idx: Option<usize>| idx.and_then(|i| cells.get(i)).unwrap_or(&Cell::Empty);
        let text = |idx: Option<usize>| cell(idx).as_text();

        let amount = match cell(Some(self.amount)).as_number() {
            Some(Ok(amount)) => amount,
            Some(Err(value)) => return Err(StatementError::InvalidAmount { row, value }),
            None => {
                return Err(StatementError::InvalidAmount {
                    row,
                    value: String::new(),
                });
            }
        };

        let cashback = match cell(self.cashback).as_number() {
            Some(Ok(value)) => Some(value),
            Some(Err(value)) => {
                debug!(row, %value, "Ignoring non-numeric cashback");
                None
            }
            None => None,
        };

        Ok(Transaction {
            date: text(Some(self.date)).unwrap_or_default(),
            amount,
            currency: text(self.currency).unwrap_or_default(),
            category: text(self.category).unwrap_or_default(),
            description: text(self.description).unwrap_or_default(),
            card_number: text(self.card_number),
            cashback,
        })
    }
}

/// Reads all operations from `path`.
///
/// A missing file is reported as [`StatementError::NotFound`]. Rows that are
/// entirely empty are skipped.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, StatementError> {
    info!("Reading operations file");
    if !path.is_file() {
        error!("Operations file does not exist");
        return Err(StatementError::NotFound(path.to_path_buf()));
    }

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let rows = if is_csv {
        read_csv_rows(path)?
    } else {
        read_workbook_rows(path)?
    };

    let transactions = transactions_from_rows(rows)?;
    info!(count = transactions.len(), "Loaded operations");
    Ok(transactions)
}

/// Converts a header row followed by data rows into transactions.
pub fn transactions_from_rows(rows: Vec<Vec<Cell>>) -> Result<Vec<Transaction>, StatementError> {
    let mut rows = rows.into_iter();
    let headers: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .iter()
        .map(|c| c.as_text().unwrap_or_default())
        .collect();
    let columns = ColumnMap::from_headers(&headers)?;
    debug!(?columns, "Resolved statement columns");

    rows.enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| *c != Cell::Empty))
        .map(|(idx, cells)| columns.transaction(idx + 2, &cells))
        .collect()
}

fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<Cell>>, StatementError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StatementError::NoWorksheet(path.to_path_buf()))??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<Cell>>, StatementError> {
    let content = fs::read_to_string(path).map_err(csv::Error::from)?;
    let header_line = content.lines().next().unwrap_or_default();
    let delimiter = if header_line.contains(';') { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

    reader
        .records()
        .map(|record| {
            let record = record?;
            Ok(record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect())
        })
        .collect()
}
