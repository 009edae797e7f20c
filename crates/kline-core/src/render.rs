// File: crates/kline-core/src/render.rs
// Summary: Render adapter seam and the JSON adapter that hands descriptions to a front end.
// Notes:
// - The core never draws; an adapter turns a finished description into an artifact.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::Chart;
use crate::composite::CompositeLayout;

/// Turns a chart or composite description into something displayable.
pub trait RenderAdapter {
    type Output;

    fn render_composite(&self, layout: &CompositeLayout) -> Result<Self::Output>;
    fn render_chart(&self, chart: &Chart) -> Result<Self::Output>;
}

/// Serializes descriptions to JSON for a browser-side charting library.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonAdapter {
    pub pretty: bool,
}

impl JsonAdapter {
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = if self.pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
        text.context("serialize chart description")
    }

    /// Render `layout` and write it to `path`, creating parent directories.
    pub fn write_composite(&self, layout: &CompositeLayout, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.render_composite(layout)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

impl RenderAdapter for JsonAdapter {
    type Output = String;

    fn render_composite(&self, layout: &CompositeLayout) -> Result<String> {
        self.encode(layout)
    }

    fn render_chart(&self, chart: &Chart) -> Result<String> {
        self.encode(chart)
    }
}
