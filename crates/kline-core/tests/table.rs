// File: crates/kline-core/tests/table.rs
// Purpose: OHLCV table validation and CSV loading.

use kline_core::indicator::Sign;
use kline_core::{DataValidationError, OhlcvRow, OhlcvTable};

fn row(date: &str, close: f64, prev_close: f64) -> OhlcvRow {
    OhlcvRow::new(date, close, close, close - 1.0, close + 1.0, prev_close, 1000.0)
}

#[test]
fn accepts_ascending_rows() {
    let table = OhlcvTable::from_rows(vec![
        row("2024-01-02", 10.0, 9.0),
        row("2024-01-03", 9.5, 10.0),
        row("2024-01-04", 9.5, 9.5),
    ])
    .expect("valid table");
    assert_eq!(table.len(), 3);
    assert_eq!(table.dates(), vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
    assert_eq!(table.closes(), vec![10.0, 9.5, 9.5]);

    let changes: Vec<Sign> = table.volume_points().iter().map(|p| p.change).collect();
    assert_eq!(changes, vec![Sign::Positive, Sign::Negative, Sign::Positive]);
    assert_eq!(table.volume_points()[2].index, 2);
}

#[test]
fn rejects_empty_table() {
    assert!(matches!(OhlcvTable::from_rows(Vec::new()), Err(DataValidationError::Empty)));
}

#[test]
fn rejects_out_of_order_and_duplicate_dates() {
    let err = OhlcvTable::from_rows(vec![row("2024-01-03", 1.0, 1.0), row("2024-01-02", 1.0, 1.0)]).unwrap_err();
    assert!(matches!(err, DataValidationError::NotAscending { index: 1, .. }), "{err}");

    let err = OhlcvTable::from_rows(vec![row("2024-01-02", 1.0, 1.0), row("2024-01-02", 1.0, 1.0)]).unwrap_err();
    assert!(matches!(err, DataValidationError::DuplicateDate { index: 1, .. }), "{err}");

    // same calendar day written two ways
    let err = OhlcvTable::from_rows(vec![row("2024-01-02", 1.0, 1.0), row("20240102", 1.0, 1.0)]).unwrap_err();
    assert!(matches!(err, DataValidationError::DuplicateDate { .. }), "{err}");
}

#[test]
fn rejects_bad_numbers() {
    let mut bad = row("2024-01-02", 1.0, 1.0);
    bad.volume = f64::NAN;
    let err = OhlcvTable::from_rows(vec![bad]).unwrap_err();
    assert!(matches!(err, DataValidationError::NonFinite { index: 0, column: "volume" }), "{err}");

    let mut inverted = row("2024-01-02", 1.0, 1.0);
    inverted.high = 0.0;
    inverted.low = 2.0;
    let err = OhlcvTable::from_rows(vec![inverted]).unwrap_err();
    assert!(matches!(err, DataValidationError::InvertedRange { index: 0, .. }), "{err}");
}

#[test]
fn rejects_open_or_close_outside_range() {
    let mut above = row("2024-01-02", 10.0, 10.0);
    above.close = 13.0;
    let err = OhlcvTable::from_rows(vec![above]).unwrap_err();
    assert!(
        matches!(err, DataValidationError::OutsideRange { index: 0, column: "close_price", value } if value == 13.0),
        "{err}"
    );

    let mut below = row("2024-01-03", 10.0, 10.0);
    below.open = 8.5;
    let rows = vec![row("2024-01-02", 10.0, 10.0), below];
    let err = OhlcvTable::from_rows(rows).unwrap_err();
    assert!(matches!(err, DataValidationError::OutsideRange { index: 1, column: "open_price", .. }), "{err}");

    // touching the extremes is fine
    let edge = OhlcvRow::new("2024-01-02", 9.0, 11.0, 9.0, 11.0, 9.0, 100.0);
    assert!(OhlcvTable::from_rows(vec![edge]).is_ok());
}

#[test]
fn loads_csv_with_extra_columns() {
    let csv = "\
idx, str_date, open_price, close_price, low_price, high_price, preclose_price, volume
0, 2024-01-02, 10.0, 10.5, 9.8, 10.7, 10.0, 1200
1, 2024-01-03, 10.5, 10.1, 10.0, 10.6, 10.5, 900
";
    let table = OhlcvTable::from_csv_reader(csv.as_bytes()).expect("csv table");
    assert_eq!(table.len(), 2);
    let first = &table.rows()[0];
    assert_eq!(first.date, "2024-01-02");
    assert_eq!(first.candle().high, 10.7);
    assert_eq!(first.prev_close, 10.0);
    assert_eq!(table.rows()[1].change(), Sign::Negative);
}

#[test]
fn csv_missing_column_fails_fast() {
    let csv = "str_date,open_price,close_price,low_price,high_price,volume\n2024-01-02,1,1,1,1,1\n";
    let err = OhlcvTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataValidationError::MissingColumn("preclose_price")), "{err}");
}

#[test]
fn csv_header_only_is_empty() {
    let csv = "str_date,open_price,close_price,low_price,high_price,preclose_price,volume\n";
    let err = OhlcvTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataValidationError::Empty));
}

#[test]
fn csv_unparseable_number_is_reported() {
    let csv = "str_date,open_price,close_price,low_price,high_price,preclose_price,volume\n2024-01-02,x,1,1,1,1,1\n";
    let err = OhlcvTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataValidationError::Csv(_)), "{err}");
}
