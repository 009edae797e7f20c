// File: crates/kline-core/src/lib.rs
// Summary: Core library entry point; indicator engine, panel builders and composite kline layout.

pub mod axis;
pub mod builder;
pub mod chart;
pub mod composite;
pub mod config;
pub mod error;
pub mod indicator;
pub mod layout;
pub mod panel;
pub mod render;
pub mod series;
pub mod sync;
pub mod table;
pub mod theme;

pub use axis::{AxisBinding, AxisOptions};
pub use chart::Chart;
pub use composite::CompositeLayout;
pub use config::{KdjConfig, KlineConfig, MacdConfig, MaLineConfig};
pub use error::{ConfigError, DataValidationError, SyncError};
pub use indicator::{derive_j, ema, macd, moving_average, stochastic, JMode, Sign};
pub use panel::Panel;
pub use render::{JsonAdapter, RenderAdapter};
pub use series::{Candle, Series, SeriesKind};
pub use sync::{SyncEvent, SyncGroup, ZoomControl, ZoomRange};
pub use table::{OhlcvRow, OhlcvTable};
pub use theme::Theme;
