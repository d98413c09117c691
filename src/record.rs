use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::amount::Amount;

/// Column order of the backing table. Every row has exactly these fields.
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }

    /// Exact persisted spelling only; user input goes through the validator.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Income" => Some(Category::Income),
            "Expense" => Some(Category::Expense),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub amount: Amount,
    pub category: Category,
    pub description: String,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        amount: Amount,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
        }
    }

    pub fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::Date(date) => self.date = date,
            FieldValue::Amount(amount) => self.amount = amount,
            FieldValue::Category(category) => self.category = category,
            FieldValue::Description(description) => self.description = description,
        }
    }
}

/// A single column, as named in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Amount,
    Category,
    Description,
}

impl Field {
    pub fn name(self) -> &'static str {
        COLUMNS[self as usize]
    }
}

/// A validated replacement value; the variant names the column it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Date(NaiveDate),
    Amount(Amount),
    Category(Category),
    Description(String),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Date(_) => Field::Date,
            FieldValue::Amount(_) => Field::Amount,
            FieldValue::Category(_) => Field::Category,
            FieldValue::Description(_) => Field::Description,
        }
    }
}

/// One row exactly as it sits in the file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Row {
    date: String,
    amount: String,
    category: String,
    description: String,
}

impl Row {
    pub(crate) fn from_record(record: &Record, date_format: &str) -> Self {
        Row {
            date: record.date.format(date_format).to_string(),
            amount: record.amount.to_string(),
            category: record.category.label().to_string(),
            description: record.description.clone(),
        }
    }

    pub(crate) fn into_record(self, row: usize, date_format: &str) -> Result<Record, StoreError> {
        let date = NaiveDate::parse_from_str(&self.date, date_format).map_err(|_| {
            StoreError::Parse {
                row,
                value: self.date.clone(),
            }
        })?;
        let amount = self.amount.parse::<Amount>().map_err(|e| StoreError::Schema {
            row,
            detail: format!("amount '{}': {}", self.amount, e),
        })?;
        let category = Category::from_label(&self.category).ok_or_else(|| StoreError::Schema {
            row,
            detail: format!("unknown category '{}'", self.category),
        })?;
        Ok(Record {
            date,
            amount,
            category,
            description: self.description,
        })
    }
}
