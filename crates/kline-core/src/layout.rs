// File: crates/kline-core/src/layout.rs
// Summary: Vertical bands for stacked panels, in percent of the canvas, and their pixel rects.

use serde::Serialize;

/// Canvas height when the config does not override it.
pub const DEFAULT_HEIGHT_PX: u32 = 800;

const LEFT_PERCENT: f64 = 5.0;
const RIGHT_PERCENT: f64 = 1.0;

/// Screen rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// One panel's grid area. Contract: all fields in `0..=100`, `top + height <= 100`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridBand {
    pub left_percent: f64,
    pub right_percent: f64,
    pub top_percent: f64,
    pub height_percent: f64,
}

impl GridBand {
    pub const fn new(top_percent: f64, height_percent: f64) -> Self {
        Self { left_percent: LEFT_PERCENT, right_percent: RIGHT_PERCENT, top_percent, height_percent }
    }

    pub fn bottom_percent(&self) -> f64 {
        self.top_percent + self.height_percent
    }

    pub fn resolve(&self, width: u32, height: u32) -> PixelRect {
        let px = |total: u32, pct: f64| (total as f64 * pct / 100.0).round() as i32;
        let top = px(height, self.top_percent);
        PixelRect::from_ltrb(
            px(width, self.left_percent),
            top,
            width as i32 - px(width, self.right_percent),
            top + px(height, self.height_percent),
        )
    }
}

/// Candlestick 30%, volume 15%, MACD 20%, KDJ 15%, top to bottom with small gaps.
pub fn stacked_bands() -> [GridBand; 4] {
    [
        GridBand::new(5.0, 30.0),
        GridBand::new(41.0, 15.0),
        GridBand::new(57.0, 20.0),
        GridBand::new(78.0, 15.0),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub height_px: u32,
    pub animation: bool,
}
