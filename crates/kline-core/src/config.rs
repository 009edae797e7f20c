// File: crates/kline-core/src/config.rs
// Summary: Configuration surface with defaults; loadable from JSON overrides.
// Notes:
// - Defaults are built fresh by `Default` impls and passed explicitly to builders;
//   there is no shared or global configuration state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::indicator::JMode;
use crate::layout::DEFAULT_HEIGHT_PX;
use crate::sync::ZoomRange;
use crate::theme::Theme;

/// One moving-average line: window length and line colour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaLineConfig {
    pub window: usize,
    pub color: String,
}

impl MaLineConfig {
    pub fn new(window: usize, color: impl Into<String>) -> Self {
        Self { window, color: color.into() }
    }
}

/// MA1/5/10/20/30 over close prices.
pub fn default_price_ma() -> Vec<MaLineConfig> {
    vec![
        MaLineConfig::new(1, "gold"),
        MaLineConfig::new(5, "blue"),
        MaLineConfig::new(10, "black"),
        MaLineConfig::new(20, "red"),
        MaLineConfig::new(30, "rosybrown"),
    ]
}

/// VMA5/10 over volume.
pub fn default_volume_ma() -> Vec<MaLineConfig> {
    vec![MaLineConfig::new(5, "blue"), MaLineConfig::new(10, "black")]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    /// Display-only multiplier on histogram bars (some platforms show 2x).
    pub hist_display_ratio: f64,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self { fast: 12, slow: 26, signal: 9, hist_display_ratio: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdjConfig {
    pub k_window: usize,
    pub k_smoothing: usize,
    pub d_smoothing: usize,
    pub j_mode: JMode,
}

impl KdjConfig {
    pub fn with_j_mode(self, j_mode: JMode) -> Self {
        Self { j_mode, ..self }
    }
}

impl Default for KdjConfig {
    fn default() -> Self {
        Self { k_window: 9, k_smoothing: 3, d_smoothing: 3, j_mode: JMode::ThreeDMinusTwoK }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KlineConfig {
    pub zoom: ZoomRange,
    pub price_ma: Vec<MaLineConfig>,
    pub volume_ma: Vec<MaLineConfig>,
    pub macd: MacdConfig,
    /// Parameters for a standalone KDJ chart (J defaults to `3D-2K`).
    pub kdj: KdjConfig,
    /// J mode used inside the composite layout (defaults to `K-D`).
    /// Separate from `kdj.j_mode`; the two defaults differ.
    pub composite_j_mode: JMode,
    pub theme: Theme,
    pub canvas_height_px: u32,
}

impl Default for KlineConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomRange::default(),
            price_ma: default_price_ma(),
            volume_ma: default_volume_ma(),
            macd: MacdConfig::default(),
            kdj: KdjConfig::default(),
            composite_j_mode: JMode::KMinusD,
            theme: Theme::default(),
            canvas_height_px: DEFAULT_HEIGHT_PX,
        }
    }
}

impl KlineConfig {
    /// Parse overrides from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        debug!(zoom_start = cfg.zoom.start_percent(), zoom_end = cfg.zoom.end_percent(), "loaded kline config");
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.price_ma.iter().chain(&self.volume_ma).any(|m| m.window == 0) {
            return Err(ConfigError::ZeroWindow("moving average"));
        }
        let m = &self.macd;
        for (name, w) in [("macd fast", m.fast), ("macd slow", m.slow), ("macd signal", m.signal)] {
            if w == 0 {
                return Err(ConfigError::ZeroWindow(name));
            }
        }
        if m.fast >= m.slow {
            return Err(ConfigError::MacdWindows { fast: m.fast, slow: m.slow });
        }
        if !m.hist_display_ratio.is_finite() || m.hist_display_ratio <= 0.0 {
            return Err(ConfigError::DisplayRatio(m.hist_display_ratio));
        }
        let k = &self.kdj;
        for (name, w) in [("kdj window", k.k_window), ("kdj k smoothing", k.k_smoothing), ("kdj d smoothing", k.d_smoothing)] {
            if w == 0 {
                return Err(ConfigError::ZeroWindow(name));
            }
        }
        Ok(())
    }

    /// KDJ parameters as used by the composite layout.
    pub fn composite_kdj(&self) -> KdjConfig {
        self.kdj.clone().with_j_mode(self.composite_j_mode)
    }
}
