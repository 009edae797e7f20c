// File: crates/kline-core/src/axis.rs
// Summary: Axis bindings (which x/y axis a series lives on) and per-panel axis options.

use serde::Serialize;

/// Axis pair a panel and its series are drawn against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AxisBinding {
    pub x_axis_index: usize,
    pub y_axis_index: usize,
}

impl AxisBinding {
    pub const fn new(x_axis_index: usize, y_axis_index: usize) -> Self {
        Self { x_axis_index, y_axis_index }
    }

    /// Same index on both axes; the composite assigns one slot per panel.
    pub const fn slot(index: usize) -> Self {
        Self::new(index, index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Date labels, one per row.
    Category,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AxisOptions {
    pub kind: AxisKind,
    /// Fit the range to the data instead of forcing zero in.
    pub scale: bool,
    pub show_labels: bool,
    pub show_pointer: bool,
    pub split_area: bool,
}

impl AxisOptions {
    pub const fn category_x() -> Self {
        Self { kind: AxisKind::Category, scale: true, show_labels: true, show_pointer: true, split_area: false }
    }

    pub const fn value_y() -> Self {
        Self { kind: AxisKind::Value, scale: true, show_labels: true, show_pointer: false, split_area: false }
    }

    pub fn with_split_area(mut self) -> Self {
        self.split_area = true;
        self
    }

    pub fn without_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }
}
