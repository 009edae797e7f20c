// File: crates/kline-core/src/table.rs
// Summary: OHLCV rows and the validated, time-ordered table every panel derives from.
// Notes:
// - Validation happens once, at construction; a table value is always non-empty,
//   strictly ascending by date and free of non-finite numbers, with open and close
//   inside each row's low..high range.
// - Missing trading days are not filled in; that is the data source's job.

use std::cmp::Ordering;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataValidationError;
use crate::indicator::Sign;
use crate::series::{Candle, VolumePoint};

/// Column names expected in CSV input, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "str_date",
    "open_price",
    "close_price",
    "low_price",
    "high_price",
    "preclose_price",
    "volume",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRow {
    #[serde(rename = "str_date")]
    pub date: String,
    #[serde(rename = "open_price")]
    pub open: f64,
    #[serde(rename = "close_price")]
    pub close: f64,
    #[serde(rename = "low_price")]
    pub low: f64,
    #[serde(rename = "high_price")]
    pub high: f64,
    #[serde(rename = "preclose_price")]
    pub prev_close: f64,
    pub volume: f64,
}

impl OhlcvRow {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        close: f64,
        low: f64,
        high: f64,
        prev_close: f64,
        volume: f64,
    ) -> Self {
        Self { date: date.into(), open, close, low, high, prev_close, volume }
    }

    pub fn candle(&self) -> Candle {
        Candle::new(self.open, self.close, self.low, self.high)
    }

    /// `Negative` only when the close fell below the previous close.
    pub fn change(&self) -> Sign {
        if self.close < self.prev_close { Sign::Negative } else { Sign::Positive }
    }

    fn check(&self, index: usize) -> Result<(), DataValidationError> {
        let fields = [
            ("open_price", self.open),
            ("close_price", self.close),
            ("low_price", self.low),
            ("high_price", self.high),
            ("preclose_price", self.prev_close),
            ("volume", self.volume),
        ];
        if let Some(&(column, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DataValidationError::NonFinite { index, column });
        }
        if self.high < self.low {
            return Err(DataValidationError::InvertedRange { index, high: self.high, low: self.low });
        }
        let bodies = [("open_price", self.open), ("close_price", self.close)];
        if let Some(&(column, value)) = bodies.iter().find(|(_, v)| !(self.low..=self.high).contains(v)) {
            return Err(DataValidationError::OutsideRange { index, column, value });
        }
        Ok(())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s.trim(), f).ok())
}

/// Calendar order when both labels parse as dates, label order otherwise.
fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OhlcvTable {
    rows: Vec<OhlcvRow>,
}

impl OhlcvTable {
    /// Validate rows: non-empty, finite numbers, `low <= open, close <= high`, strictly ascending dates.
    pub fn from_rows(rows: Vec<OhlcvRow>) -> Result<Self, DataValidationError> {
        if rows.is_empty() {
            return Err(DataValidationError::Empty);
        }
        for (index, row) in rows.iter().enumerate() {
            row.check(index)?;
            if index == 0 {
                continue;
            }
            let previous = &rows[index - 1].date;
            match compare_dates(previous, &row.date) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(DataValidationError::DuplicateDate { index, date: row.date.clone() });
                }
                Ordering::Greater => {
                    return Err(DataValidationError::NotAscending {
                        index,
                        previous: previous.clone(),
                        date: row.date.clone(),
                    });
                }
            }
        }
        debug!(rows = rows.len(), first = %rows[0].date, last = %rows[rows.len() - 1].date, "validated ohlcv table");
        Ok(Self { rows })
    }

    /// Read a headed CSV. Extra columns are ignored; every required column must be present.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, DataValidationError> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(rdr)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DataValidationError> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::from_csv(rdr)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, DataValidationError> {
        let headers = rdr.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
            return Err(DataValidationError::MissingColumn(*missing));
        }
        let rows = rdr.deserialize::<OhlcvRow>().collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> &[OhlcvRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.date.clone()).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.low).collect()
    }

    pub fn candles(&self) -> Vec<Candle> {
        self.rows.iter().map(OhlcvRow::candle).collect()
    }

    pub fn volume_points(&self) -> Vec<VolumePoint> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, r)| VolumePoint { index, volume: r.volume, change: r.change() })
            .collect()
    }
}
