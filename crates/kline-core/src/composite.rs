// File: crates/kline-core/src/composite.rs
// Summary: Composite kline layout: four stacked panels on one synchronized time axis.
// Notes:
// - Slot order is fixed: candlestick, volume, MACD, KDJ. A panel's x and y axis
//   index both equal its slot.
// - Built once per table and never updated; a new table means a new layout.

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::axis::AxisBinding;
use crate::builder::{candlestick_panel, kdj_panel, macd_panel, volume_panel};
use crate::config::KlineConfig;
use crate::error::{DataValidationError, SyncError};
use crate::layout::{stacked_bands, Canvas, GridBand, PixelRect};
use crate::panel::Panel;
use crate::sync::{AxisEvent, SyncEvent, SyncGroup, ZoomRange};
use crate::table::{OhlcvRow, OhlcvTable};

pub const CANDLESTICK_SLOT: usize = 0;
pub const VOLUME_SLOT: usize = 1;
pub const MACD_SLOT: usize = 2;
pub const KDJ_SLOT: usize = 3;
pub const PANEL_COUNT: usize = 4;

pub const PANEL_TITLES: [&str; PANEL_COUNT] = ["CANDLESTICK", "VOLUME", "MACD", "KDJ"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompositeLayout {
    title: String,
    dates: Vec<String>,
    panels: Vec<Panel>,
    sync: SyncGroup,
    bands: Vec<GridBand>,
    canvas: Canvas,
}

impl CompositeLayout {
    /// Validate `rows` and build; fails before any indicator work on a bad table.
    pub fn from_rows(
        title: impl Into<String>,
        rows: Vec<OhlcvRow>,
        config: &KlineConfig,
    ) -> Result<Self, DataValidationError> {
        let table = OhlcvTable::from_rows(rows)?;
        Ok(Self::build(title, &table, config))
    }

    pub fn build(title: impl Into<String>, table: &OhlcvTable, config: &KlineConfig) -> Self {
        let theme = &config.theme;
        let bands = stacked_bands();
        let closes = table.closes();

        let candlestick = candlestick_panel(
            PANEL_TITLES[CANDLESTICK_SLOT],
            &table.candles(),
            AxisBinding::slot(CANDLESTICK_SLOT),
            &config.price_ma,
            theme,
        );
        let volume = volume_panel(
            PANEL_TITLES[VOLUME_SLOT],
            &table.volume_points(),
            AxisBinding::slot(VOLUME_SLOT),
            &config.volume_ma,
            theme,
        );
        let macd = macd_panel(PANEL_TITLES[MACD_SLOT], &closes, AxisBinding::slot(MACD_SLOT), &config.macd, theme);
        let kdj = kdj_panel(
            PANEL_TITLES[KDJ_SLOT],
            &table.highs(),
            &table.lows(),
            &closes,
            AxisBinding::slot(KDJ_SLOT),
            &config.composite_kdj(),
            theme,
        );

        // only the price panel keeps tick labels
        let stacked = |panel: Panel, slot: usize| panel.without_axis_labels().with_legend_top(bands[slot].top_percent);
        let panels = vec![
            candlestick,
            stacked(volume, VOLUME_SLOT),
            stacked(macd, MACD_SLOT),
            stacked(kdj, KDJ_SLOT),
        ];
        let sync = SyncGroup::new(0..PANEL_COUNT, config.zoom);
        debug!(
            rows = table.len(),
            series = panels.iter().map(|p| p.series.len()).sum::<usize>(),
            j_mode = %config.composite_j_mode,
            "built composite kline layout"
        );

        Self {
            title: title.into(),
            dates: table.dates(),
            panels,
            sync,
            bands: bands.to_vec(),
            canvas: Canvas { height_px: config.canvas_height_px, animation: false },
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn sync(&self) -> &SyncGroup {
        &self.sync
    }

    pub fn bands(&self) -> &[GridBand] {
        &self.bands
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn panel(&self, slot: usize) -> Option<&Panel> {
        self.panels.get(slot)
    }

    /// Same panels read through a different shared zoom window.
    pub fn with_zoom(&self, zoom: ZoomRange) -> Self {
        Self { sync: self.sync.with_zoom(zoom), ..self.clone() }
    }

    /// Date indices inside the current zoom window.
    pub fn visible_range(&self) -> Range<usize> {
        self.sync.zoom().visible_range(self.dates.len())
    }

    /// Deliver a zoom or hover event raised on one panel to all linked panels.
    pub fn mirror(&self, source_axis: usize, event: SyncEvent) -> Result<Vec<AxisEvent>, SyncError> {
        self.sync.mirror(source_axis, event, self.dates.len())
    }

    /// Band rectangles in pixels for a canvas `width` wide and `canvas.height_px` tall.
    pub fn pixel_bands(&self, width: u32) -> Vec<PixelRect> {
        self.bands.iter().map(|b| b.resolve(width, self.canvas.height_px)).collect()
    }
}
