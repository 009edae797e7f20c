// File: crates/kline-core/src/chart.rs
// Summary: Standalone single-panel chart with its own zoom window.
// Notes:
// - Each panel kind can be shown on its own; the chart then owns a one-axis
//   sync group with the usual slider + inside zoom controls.
// - A standalone KDJ chart uses `config.kdj` as is (J = 3D-2K by default),
//   unlike the composite which switches to `config.composite_j_mode`.

use serde::Serialize;

use crate::axis::AxisBinding;
use crate::builder::{candlestick_panel, kdj_panel, macd_panel, volume_panel};
use crate::config::KlineConfig;
use crate::panel::Panel;
use crate::sync::{SyncGroup, ZoomRange};
use crate::table::OhlcvTable;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    dates: Vec<String>,
    panel: Panel,
    sync: SyncGroup,
}

impl Chart {
    pub fn new(dates: Vec<String>, panel: Panel, zoom: ZoomRange) -> Self {
        let sync = SyncGroup::new([panel.axes.x_axis_index], zoom);
        Self { dates, panel, sync }
    }

    pub fn candlestick(title: &str, table: &OhlcvTable, config: &KlineConfig) -> Self {
        let panel = candlestick_panel(title, &table.candles(), AxisBinding::default(), &config.price_ma, &config.theme);
        Self::new(table.dates(), panel, config.zoom)
    }

    pub fn volume(title: &str, table: &OhlcvTable, config: &KlineConfig) -> Self {
        let panel = volume_panel(title, &table.volume_points(), AxisBinding::default(), &config.volume_ma, &config.theme);
        Self::new(table.dates(), panel, config.zoom)
    }

    pub fn macd(title: &str, table: &OhlcvTable, config: &KlineConfig) -> Self {
        let panel = macd_panel(title, &table.closes(), AxisBinding::default(), &config.macd, &config.theme);
        Self::new(table.dates(), panel, config.zoom)
    }

    pub fn kdj(title: &str, table: &OhlcvTable, config: &KlineConfig) -> Self {
        let panel = kdj_panel(
            title,
            &table.highs(),
            &table.lows(),
            &table.closes(),
            AxisBinding::default(),
            &config.kdj,
            &config.theme,
        );
        Self::new(table.dates(), panel, config.zoom)
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn sync(&self) -> &SyncGroup {
        &self.sync
    }
}
