// File: crates/kline-core/src/panel.rs
// Summary: Panel description: one chart region with its axis pair, legend and series.

use serde::Serialize;

use crate::axis::{AxisBinding, AxisOptions};
use crate::series::Series;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub scroll: bool,
    /// Anchored to the right edge; `top` is a percentage of the canvas height.
    pub top_percent: Option<f64>,
}

impl Default for Legend {
    fn default() -> Self {
        Self { scroll: true, top_percent: None }
    }
}

/// Built once by a builder, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub axes: AxisBinding,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub legend: Legend,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn new(title: impl Into<String>, axes: AxisBinding) -> Self {
        Self {
            title: title.into(),
            axes,
            x_axis: AxisOptions::category_x(),
            y_axis: AxisOptions::value_y(),
            legend: Legend::default(),
            series: Vec::new(),
        }
    }

    pub fn with_y_axis(mut self, y_axis: AxisOptions) -> Self {
        self.y_axis = y_axis;
        self
    }

    pub fn with_series(mut self, series: impl IntoIterator<Item = Series>) -> Self {
        self.series.extend(series);
        self
    }

    /// Suppress tick labels on both axes (stacked panels below the price panel).
    pub fn without_axis_labels(mut self) -> Self {
        self.x_axis = self.x_axis.without_labels();
        self.y_axis = self.y_axis.without_labels();
        self
    }

    pub fn with_legend_top(mut self, top_percent: f64) -> Self {
        self.legend.top_percent = Some(top_percent);
        self
    }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}
