// File: crates/kline-core/src/sync.rs
// Summary: Shared zoom window and axis synchronization group (zoom + crosshair lockstep).

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SyncError};

#[derive(Deserialize)]
struct RawZoomRange {
    start_percent: f64,
    end_percent: f64,
}

/// Visible window as percentages of the full date range.
/// Contract: `0 <= start_percent <= end_percent <= 100`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZoomRange")]
pub struct ZoomRange {
    start_percent: f64,
    end_percent: f64,
}

impl TryFrom<RawZoomRange> for ZoomRange {
    type Error = ConfigError;

    fn try_from(raw: RawZoomRange) -> Result<Self, Self::Error> {
        Self::new(raw.start_percent, raw.end_percent)
    }
}

impl ZoomRange {
    pub fn new(start_percent: f64, end_percent: f64) -> Result<Self, ConfigError> {
        let ok = start_percent.is_finite()
            && end_percent.is_finite()
            && (0.0..=100.0).contains(&start_percent)
            && (start_percent..=100.0).contains(&end_percent);
        if !ok {
            return Err(ConfigError::InvalidZoom { start: start_percent, end: end_percent });
        }
        Ok(Self { start_percent, end_percent })
    }

    pub const fn full() -> Self {
        Self { start_percent: 0.0, end_percent: 100.0 }
    }

    pub fn start_percent(&self) -> f64 {
        self.start_percent
    }

    pub fn end_percent(&self) -> f64 {
        self.end_percent
    }

    /// Index range of a `len`-point series that falls inside the window.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let n = len as f64;
        let start = ((n * self.start_percent / 100.0).floor() as usize).min(len);
        let end = ((n * self.end_percent / 100.0).ceil() as usize).clamp(start, len);
        start..end
    }
}

impl Default for ZoomRange {
    /// Last tenth of the history.
    fn default() -> Self {
        Self { start_percent: 90.0, end_percent: 100.0 }
    }
}

/// Zoom widgets; every control of a group drives the same range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomControl {
    /// Visible slider below the panels.
    Slider,
    /// Wheel/drag zoom inside the plot area.
    Inside,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SyncEvent {
    Zoom { control: ZoomControl, range: ZoomRange },
    Hover { index: usize },
}

/// An event delivered to one member axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisEvent {
    pub axis: usize,
    pub event: SyncEvent,
}

/// Axis indices kept in lockstep plus the single zoom record they all read.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SyncGroup {
    axes: Vec<usize>,
    zoom: ZoomRange,
    controls: Vec<ZoomControl>,
    link_pointer: bool,
}

impl SyncGroup {
    /// Group with slider + inside zoom and a linked crosshair. Duplicate axes are dropped.
    pub fn new(axes: impl IntoIterator<Item = usize>, zoom: ZoomRange) -> Self {
        let mut members: Vec<usize> = Vec::new();
        for a in axes {
            if !members.contains(&a) {
                members.push(a);
            }
        }
        Self { axes: members, zoom, controls: vec![ZoomControl::Slider, ZoomControl::Inside], link_pointer: true }
    }

    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    pub fn zoom(&self) -> &ZoomRange {
        &self.zoom
    }

    pub fn controls(&self) -> &[ZoomControl] {
        &self.controls
    }

    pub fn link_pointer(&self) -> bool {
        self.link_pointer
    }

    pub fn contains(&self, axis: usize) -> bool {
        self.axes.contains(&axis)
    }

    /// A new group with the same members reading `zoom`.
    pub fn with_zoom(&self, zoom: ZoomRange) -> Self {
        Self { zoom, ..self.clone() }
    }

    /// Fan an event raised on `source_axis` out to every member axis.
    ///
    /// Zoom events always reach all members; hover events do too while the
    /// crosshair is linked. `len` is the number of dates on the shared x-axis.
    pub fn mirror(&self, source_axis: usize, event: SyncEvent, len: usize) -> Result<Vec<AxisEvent>, SyncError> {
        if !self.contains(source_axis) {
            return Err(SyncError::UnknownAxis(source_axis));
        }
        if let SyncEvent::Hover { index } = event {
            if index >= len {
                return Err(SyncError::HoverOutOfRange { index, len });
            }
            if !self.link_pointer {
                return Ok(vec![AxisEvent { axis: source_axis, event }]);
            }
        }
        Ok(self.axes.iter().map(|&axis| AxisEvent { axis, event }).collect())
    }
}
