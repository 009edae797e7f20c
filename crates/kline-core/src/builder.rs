// File: crates/kline-core/src/builder.rs
// Summary: Panel builders: candlestick, moving-average overlay, volume, MACD and KDJ.
// Notes:
// - Builders read their inputs by reference and return a fresh `Panel`; they share
//   no state with each other and never touch the caller's series.
// - All inputs are aligned to one date axis; the dates themselves live on the
//   chart/composite that owns the panels.

use std::iter;

use crate::axis::{AxisBinding, AxisOptions};
use crate::config::{KdjConfig, MacdConfig, MaLineConfig};
use crate::indicator::{derive_j, macd, moving_average, stochastic};
use crate::panel::Panel;
use crate::series::{BarPoint, Candle, Series, VolumePoint};
use crate::theme::Theme;

pub const CANDLE_SERIES: &str = "candle";
pub const VOLUME_SERIES: &str = "volume";
pub const MACD_DIFF_SERIES: &str = "DIF";
pub const MACD_SIGNAL_SERIES: &str = "DEA";
pub const MACD_HIST_SERIES: &str = "HIST";

/// Close prices of `candles`, the input of the price overlay.
pub fn close_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// One SMA line per config, named `{prefix}{window}`, drawn on the host panel's `axes`.
pub fn ma_overlay(
    prefix: &str,
    values: &[f64],
    lines: &[MaLineConfig],
    axes: AxisBinding,
    theme: &Theme,
) -> Vec<Series> {
    lines
        .iter()
        .map(|cfg| {
            Series::line(
                format!("{prefix}{}", cfg.window),
                axes,
                moving_average(values, cfg.window),
                theme.line(&cfg.color),
            )
        })
        .collect()
}

/// Candles plus the `MA{n}` price overlay on the same axis pair.
pub fn candlestick_panel(
    title: &str,
    candles: &[Candle],
    axes: AxisBinding,
    ma_lines: &[MaLineConfig],
    theme: &Theme,
) -> Panel {
    let closes = close_prices(candles);
    Panel::new(title, axes)
        .with_y_axis(AxisOptions::value_y().with_split_area())
        .with_series(iter::once(Series::candles(CANDLE_SERIES, axes, candles.to_vec(), theme.candle())))
        .with_series(ma_overlay("MA", &closes, ma_lines, axes, theme))
}

/// Volume bars tagged with their change state plus the `VMA{n}` overlay.
pub fn volume_panel(
    title: &str,
    points: &[VolumePoint],
    axes: AxisBinding,
    ma_lines: &[MaLineConfig],
    theme: &Theme,
) -> Panel {
    let bars = points.iter().map(|p| BarPoint::new(p.index, Some(p.volume), p.change)).collect();
    let volumes: Vec<f64> = points.iter().map(|p| p.volume).collect();
    Panel::new(title, axes)
        .with_y_axis(AxisOptions::value_y().with_split_area())
        .with_series(iter::once(Series::bars(VOLUME_SERIES, axes, bars, theme.bar())))
        .with_series(ma_overlay("VMA", &volumes, ma_lines, axes, theme))
}

/// Histogram bars plus DIF/DEA lines.
///
/// Bar heights are scaled by `hist_display_ratio`; the sign tag always comes
/// from the unscaled histogram.
pub fn macd_panel(title: &str, closes: &[f64], axes: AxisBinding, cfg: &MacdConfig, theme: &Theme) -> Panel {
    let out = macd(closes, cfg.fast, cfg.slow, cfg.signal);
    let ratio = cfg.hist_display_ratio;
    let hist = out
        .histogram
        .iter()
        .enumerate()
        .map(|(i, h)| BarPoint::new(i, h.value.map(|v| v * ratio), h.sign))
        .collect();
    Panel::new(title, axes).with_series([
        Series::bars(MACD_HIST_SERIES, axes, hist, theme.bar()),
        Series::line(MACD_DIFF_SERIES, axes, out.diff, theme.line(&theme.macd_diff)),
        Series::line(MACD_SIGNAL_SERIES, axes, out.signal, theme.line(&theme.macd_signal)),
    ])
}

/// K, D and J lines on one axis pair; J follows `cfg.j_mode`.
pub fn kdj_panel(
    title: &str,
    high: &[f64],
    low: &[f64],
    close: &[f64],
    axes: AxisBinding,
    cfg: &KdjConfig,
    theme: &Theme,
) -> Panel {
    let stoch = stochastic(high, low, close, cfg.k_window, cfg.k_smoothing, cfg.d_smoothing);
    let j = derive_j(&stoch.k, &stoch.d, cfg.j_mode);
    Panel::new(title, axes).with_series([
        Series::line("K", axes, stoch.k, theme.line(&theme.kdj_k)),
        Series::line("D", axes, stoch.d, theme.line(&theme.kdj_d)),
        Series::line("J", axes, j, theme.line(&theme.kdj_j)),
    ])
}
