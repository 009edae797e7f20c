// File: crates/kline-core/src/error.rs
// Summary: Error types for table validation, configuration and axis synchronization.

use thiserror::Error;

/// Raised while turning raw rows into an [`crate::OhlcvTable`].
/// Fatal for the whole pipeline: nothing downstream runs on a bad table.
#[derive(Debug, Error)]
pub enum DataValidationError {
    #[error("table is empty")]
    Empty,
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {index}: date `{date}` is not after previous date `{previous}`")]
    NotAscending { index: usize, previous: String, date: String },
    #[error("row {index}: duplicate date `{date}`")]
    DuplicateDate { index: usize, date: String },
    #[error("row {index}: `{column}` is not a finite number")]
    NonFinite { index: usize, column: &'static str },
    #[error("row {index}: high {high} below low {low}")]
    InvertedRange { index: usize, high: f64, low: f64 },
    #[error("row {index}: `{column}` {value} outside the low..high range")]
    OutsideRange { index: usize, column: &'static str, value: f64 },
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zoom range {start}..{end} must satisfy 0 <= start <= end <= 100")]
    InvalidZoom { start: f64, end: f64 },
    #[error("`{0}` window must be at least 1")]
    ZeroWindow(&'static str),
    #[error("macd fast window {fast} must be shorter than slow window {slow}")]
    MacdWindows { fast: usize, slow: usize },
    #[error("histogram display ratio {0} must be finite and positive")]
    DisplayRatio(f64),
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("axis {0} is not part of the synchronization group")]
    UnknownAxis(usize),
    #[error("hover index {index} outside series of length {len}")]
    HoverOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown J derivation mode `{0}` (expected 3D-2K, 3K-2D or K-D)")]
pub struct JModeParseError(pub String);
