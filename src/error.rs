//! Error types for metric calculation and data loading

use thiserror::Error;

/// Result alias for metric calculations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Errors raised while deriving ratios from the raw financial facts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// EPS of exactly zero makes the earnings payout ratio undefined
    #[error("earnings per share is zero for fiscal year {year}")]
    ZeroEarnings { year: u16 },

    /// NaN or infinite value in an input field
    #[error("non-finite {field} for fiscal year {year}")]
    NonFinite { year: u16, field: &'static str },

    #[error("negative dividend per share ({dps}) for fiscal year {year}")]
    NegativeDividend { year: u16, dps: f64 },

    #[error("reference share price must be positive, got {0}")]
    InvalidPrice(f64),

    #[error("shares outstanding must be positive, got {0}")]
    InvalidShares(f64),
}

/// Errors raised while loading a dataset from CSV files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Text column that does not map to a known variant
    #[error("unknown {field} value: {value:?}")]
    UnknownValue { field: &'static str, value: String },

    #[error("invalid leverage indicator: {0:?}")]
    InvalidLeverage(String),

    #[error("missing profile key: {0}")]
    MissingKey(&'static str),

    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// dividends.csv and financials.csv disagree on a year's DPS
    #[error("FY{year} DPS is {financials} in financials but {dividends} in dividends")]
    DividendMismatch {
        year: u16,
        financials: f64,
        dividends: f64,
    },
}
