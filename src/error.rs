use std::path::PathBuf;

use thiserror::Error;

use crate::amount::AmountError;

/// Failures of the backing table. `row` is the zero-based record position,
/// not the line number in the file (the header is not counted).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger file {} does not exist, initialize it first", .0.display())]
    NotFound(PathBuf),
    #[error("unexpected header {found:?}, expected {expected:?}")]
    Header { found: Vec<String>, expected: Vec<String> },
    #[error("row {row}: date '{value}' does not match the expected format")]
    Parse { row: usize, value: String },
    #[error("row {row}: {detail}")]
    Schema { row: usize, detail: String },
    #[error("position {position} is out of range, the ledger has {len} records")]
    OutOfRange { position: usize, len: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Rejected user input. All of these are recoverable by asking again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid date format. Please enter the date in dd-mm-yyyy format.")]
    InvalidFormat,
    #[error("Invalid amount ({0}). Amount must be a positive number.")]
    InvalidAmount(AmountReason),
    #[error("Invalid category. Please enter 'I' for Income or 'E' for Expense.")]
    InvalidCategory,
    #[error("Invalid field. Choose one of: date, amount, category, description.")]
    InvalidField,
    #[error("Invalid position. Please enter a row number from the list.")]
    InvalidPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountReason {
    Malformed(AmountError),
    NotPositive,
}

impl std::fmt::Display for AmountReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountReason::Malformed(e) => e.fmt(f),
            AmountReason::NotPositive => f.write_str("amount must be more than 0"),
        }
    }
}
