// File: crates/kline-core/src/theme.rs
// Summary: Colour palette and per-series style records handed to the renderer.
// Notes:
// - Colours are CSS colour strings; the renderer owns their interpretation.

use serde::{Deserialize, Serialize};

use crate::indicator::Sign;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    /// Up candles, non-negative histogram bars, rising-volume bars.
    pub positive: String,
    pub negative: String,
    pub macd_diff: String,
    pub macd_signal: String,
    pub kdj_k: String,
    pub kdj_d: String,
    pub kdj_j: String,
    pub line_width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            positive: "#B34038".to_string(),
            negative: "#354654".to_string(),
            macd_diff: "gold".to_string(),
            macd_signal: "blue".to_string(),
            kdj_k: "red".to_string(),
            kdj_d: "blue".to_string(),
            kdj_j: "gold".to_string(),
            line_width: 1.0,
        }
    }

    pub fn line(&self, color: &str) -> LineStyle {
        LineStyle { color: color.to_string(), width: self.line_width, show_symbol: false }
    }

    pub fn candle(&self) -> CandleStyle {
        CandleStyle { up_color: self.positive.clone(), down_color: self.negative.clone() }
    }

    pub fn bar(&self) -> BarStyle {
        BarStyle { positive_color: self.positive.clone(), negative_color: self.negative.clone(), show_label: false }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f32,
    pub show_symbol: bool,
}

/// Up/down colours by convention (close >= open is up); no per-point colour.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandleStyle {
    pub up_color: String,
    pub down_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarStyle {
    pub positive_color: String,
    pub negative_color: String,
    pub show_label: bool,
}

impl BarStyle {
    pub fn color_for(&self, sign: Sign) -> &str {
        match sign {
            Sign::Positive => &self.positive_color,
            Sign::Negative => &self.negative_color,
        }
    }
}
