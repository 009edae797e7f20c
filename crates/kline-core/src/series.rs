// File: crates/kline-core/src/series.rs
// Summary: Series model for line, bar and candlestick data bound to an axis pair.
// Notes:
// - The series kind is the tag of `SeriesData`, so kind and points cannot disagree.
// - Undefined line values stay `None` and serialize as `null` for the renderer.

use serde::{Deserialize, Serialize};

use crate::axis::AxisBinding;
use crate::indicator::Sign;
use crate::theme::{BarStyle, CandleStyle, LineStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Candlestick,
}

/// One candlestick body, serialized as `[open, close, low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl Candle {
    pub const fn new(open: f64, close: f64, low: f64, high: f64) -> Self {
        Self { open, close, low, high }
    }
}

impl From<[f64; 4]> for Candle {
    fn from([open, close, low, high]: [f64; 4]) -> Self {
        Self { open, close, low, high }
    }
}

impl From<Candle> for [f64; 4] {
    fn from(c: Candle) -> Self {
        [c.open, c.close, c.low, c.high]
    }
}

/// Bar at a date index. `sign` selects the colour; the renderer never re-derives it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BarPoint {
    pub index: usize,
    pub value: Option<f64>,
    pub sign: Sign,
}

impl BarPoint {
    pub fn new(index: usize, value: Option<f64>, sign: Sign) -> Self {
        Self { index, value, sign }
    }
}

/// Volume of one row with its day-over-day change state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VolumePoint {
    pub index: usize,
    pub volume: f64,
    /// `Positive` when close >= previous close.
    pub change: Sign,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum SeriesData {
    Line(Vec<Option<f64>>),
    Bar(Vec<BarPoint>),
    Candlestick(Vec<Candle>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeriesStyle {
    Line(LineStyle),
    Bar(BarStyle),
    Candle(CandleStyle),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub axes: AxisBinding,
    #[serde(flatten)]
    pub data: SeriesData,
    pub style: SeriesStyle,
}

impl Series {
    pub fn line(name: impl Into<String>, axes: AxisBinding, values: Vec<Option<f64>>, style: LineStyle) -> Self {
        Self { name: name.into(), axes, data: SeriesData::Line(values), style: SeriesStyle::Line(style) }
    }

    pub fn bars(name: impl Into<String>, axes: AxisBinding, points: Vec<BarPoint>, style: BarStyle) -> Self {
        Self { name: name.into(), axes, data: SeriesData::Bar(points), style: SeriesStyle::Bar(style) }
    }

    pub fn candles(name: impl Into<String>, axes: AxisBinding, candles: Vec<Candle>, style: CandleStyle) -> Self {
        Self { name: name.into(), axes, data: SeriesData::Candlestick(candles), style: SeriesStyle::Candle(style) }
    }

    pub fn kind(&self) -> SeriesKind {
        match self.data {
            SeriesData::Line(_) => SeriesKind::Line,
            SeriesData::Bar(_) => SeriesKind::Bar,
            SeriesData::Candlestick(_) => SeriesKind::Candlestick,
        }
    }

    /// Number of points (one per date).
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Line(v) => v.len(),
            SeriesData::Bar(v) => v.len(),
            SeriesData::Candlestick(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn line_values(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            SeriesData::Line(v) => Some(v),
            _ => None,
        }
    }

    pub fn bar_points(&self) -> Option<&[BarPoint]> {
        match &self.data {
            SeriesData::Bar(v) => Some(v),
            _ => None,
        }
    }

    pub fn candle_points(&self) -> Option<&[Candle]> {
        match &self.data {
            SeriesData::Candlestick(v) => Some(v),
            _ => None,
        }
    }
}
