use std::path::PathBuf;

pub const DEFAULT_FILE: &str = "finance_data.csv";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Where the ledger lives and how its dates are spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub date_format: String,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
