// File: crates/kline-core/src/indicator.rs
// Summary: Indicator engine: SMA, EMA, MACD and stochastic K/D with derived J.
// Notes:
// - Every function is pure and returns a vector aligned 1:1 with its input.
// - `None` marks undefined entries (warm-up prefix, zero stochastic range).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::JModeParseError;

/// Indicator output aligned to the input's date index.
pub type IndicatorResult = Vec<Option<f64>>;

/// Sign tag carried with histogram and volume points for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `Negative` only when `value < 0`; NaN is never below zero.
    pub fn of(value: f64) -> Self {
        if value < 0.0 { Sign::Negative } else { Sign::Positive }
    }

    /// Undefined values are tagged `Positive`.
    pub fn of_opt(value: Option<f64>) -> Self {
        value.map_or(Sign::Positive, Sign::of)
    }
}

/// A possibly undefined value with its sign computed once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedValue {
    pub value: Option<f64>,
    pub sign: Sign,
}

impl SignedValue {
    pub fn new(value: Option<f64>) -> Self {
        Self { value, sign: Sign::of_opt(value) }
    }
}

fn sma_by(len: usize, window: usize, get: impl Fn(usize) -> Option<f64>) -> IndicatorResult {
    let mut out = vec![None; len];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..len {
        let mut sum = 0.0f64;
        let mut defined = true;
        for j in (i + 1 - window)..=i {
            match get(j) {
                Some(v) => sum += v,
                None => {
                    defined = false;
                    break;
                }
            }
        }
        if defined {
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

/// Simple moving average over the trailing `window` points, current point included.
/// Entries before the window fills are `None`; `window == 0` yields all `None`.
pub fn moving_average(series: &[f64], window: usize) -> IndicatorResult {
    if window == 0 {
        warn!("moving average requested with a zero window");
    }
    sma_by(series.len(), window, |i| Some(series[i]))
}

/// SMA over a partially defined series: defined only where the whole window is.
pub fn moving_average_opt(series: &[Option<f64>], window: usize) -> IndicatorResult {
    sma_by(series.len(), window, |i| series[i])
}

fn ema_by(len: usize, window: usize, get: impl Fn(usize) -> Option<f64>) -> IndicatorResult {
    let mut out = vec![None; len];
    if window == 0 {
        return out;
    }
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut prev: Option<f64> = None;
    let mut seed_sum = 0.0f64;
    let mut seed_count = 0usize;
    for (i, slot) in out.iter_mut().enumerate() {
        let Some(v) = get(i) else {
            // a gap restarts the warm-up
            prev = None;
            seed_sum = 0.0;
            seed_count = 0;
            continue;
        };
        prev = match prev {
            Some(p) => Some(alpha * v + (1.0 - alpha) * p),
            None => {
                seed_sum += v;
                seed_count += 1;
                (seed_count == window).then(|| seed_sum / window as f64)
            }
        };
        *slot = prev;
    }
    out
}

/// Exponential moving average with smoothing factor `2 / (window + 1)`,
/// seeded by the simple mean of the first `window` points.
pub fn ema(series: &[f64], window: usize) -> IndicatorResult {
    ema_by(series.len(), window, |i| Some(series[i]))
}

/// EMA over a partially defined series; seeding starts at the first defined run.
pub fn ema_opt(series: &[Option<f64>], window: usize) -> IndicatorResult {
    ema_by(series.len(), window, |i| series[i])
}

/// Pointwise `f(a, b)`; the shorter input is treated as undefined past its end.
fn combine(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> IndicatorResult {
    let at = |s: &[Option<f64>], i: usize| s.get(i).copied().flatten();
    (0..a.len().max(b.len()))
        .map(|i| match (at(a, i), at(b, i)) {
            (Some(x), Some(y)) => Some(f(x, y)),
            _ => None,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA ("DIF").
    pub diff: IndicatorResult,
    /// EMA of `diff` ("DEA").
    pub signal: IndicatorResult,
    /// `diff - signal`, each point tagged with its sign.
    pub histogram: Vec<SignedValue>,
}

/// MACD line, signal line and histogram of a close-price series.
///
/// The fast EMA is seeded from the `fast_window` points ending at `slow_window - 1`,
/// so both EMAs start on the same bar (TA-Lib alignment).
pub fn macd(close: &[f64], fast_window: usize, slow_window: usize, signal_window: usize) -> MacdOutput {
    let offset = slow_window.saturating_sub(fast_window);
    let fast = ema_by(close.len(), fast_window, |i| (i >= offset).then(|| close[i]));
    let slow = ema(close, slow_window);
    let diff = combine(&fast, &slow, |f, s| f - s);
    let signal = ema_opt(&diff, signal_window);
    let histogram = combine(&diff, &signal, |d, s| d - s)
        .into_iter()
        .map(SignedValue::new)
        .collect();
    MacdOutput { diff, signal, histogram }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StochasticOutput {
    pub k: IndicatorResult,
    pub d: IndicatorResult,
}

/// Slow stochastic oscillator.
///
/// raw %K = 100 * (close - lowest low) / (highest high - lowest low) over `k_window`,
/// smoothed %K = SMA(raw %K, `k_smoothing`), %D = SMA(smoothed %K, `d_smoothing`).
/// A flat window (highest high equal to lowest low) leaves raw %K undefined.
pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    k_window: usize,
    k_smoothing: usize,
    d_smoothing: usize,
) -> StochasticOutput {
    let len = close.len();
    let mut raw_k = vec![None; len];
    if k_window == 0 {
        warn!("stochastic requested with a zero window");
    } else {
        for i in (k_window - 1)..len {
            let start = i + 1 - k_window;
            let (Some(highs), Some(lows)) = (high.get(start..=i), low.get(start..=i)) else {
                continue;
            };
            let highest = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let lowest = lows.iter().copied().fold(f64::INFINITY, f64::min);
            let range = highest - lowest;
            if range == 0.0 {
                continue;
            }
            raw_k[i] = Some(100.0 * (close[i] - lowest) / range);
        }
    }
    let k = moving_average_opt(&raw_k, k_smoothing);
    let d = moving_average_opt(&k, d_smoothing);
    StochasticOutput { k, d }
}

/// Linear combination used to derive the J line from K and D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JMode {
    /// `3D - 2K`
    #[default]
    ThreeDMinusTwoK,
    /// `3K - 2D`
    ThreeKMinusTwoD,
    /// `K - D`
    KMinusD,
}

impl JMode {
    pub const fn name(self) -> &'static str {
        match self {
            JMode::ThreeDMinusTwoK => "3D-2K",
            JMode::ThreeKMinusTwoD => "3K-2D",
            JMode::KMinusD => "K-D",
        }
    }

    /// Parse a mode name, falling back to `K-D` (with a warning) when unrecognized.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: JModeParseError| {
            warn!(mode = %err.0, "unknown J derivation mode, falling back to K-D");
            JMode::KMinusD
        })
    }

    #[inline]
    pub fn apply(self, k: f64, d: f64) -> f64 {
        match self {
            JMode::ThreeDMinusTwoK => 3.0 * d - 2.0 * k,
            JMode::ThreeKMinusTwoD => 3.0 * k - 2.0 * d,
            JMode::KMinusD => k - d,
        }
    }
}

impl FromStr for JMode {
    type Err = JModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [JMode::ThreeDMinusTwoK, JMode::ThreeKMinusTwoD, JMode::KMinusD]
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JModeParseError(s.to_string()))
    }
}

impl fmt::Display for JMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for JMode {
    fn from(name: String) -> Self {
        JMode::parse_lenient(&name)
    }
}

impl From<JMode> for String {
    fn from(mode: JMode) -> Self {
        mode.name().to_string()
    }
}

/// Per-index J line; undefined wherever K or D is.
pub fn derive_j(k: &[Option<f64>], d: &[Option<f64>], mode: JMode) -> IndicatorResult {
    combine(k, d, |k, d| mode.apply(k, d))
}
