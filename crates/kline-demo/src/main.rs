// File: crates/kline-demo/src/main.rs
// Summary: Demo loads an OHLCV CSV, builds the composite kline layout and writes its JSON description.
// Usage: kline-demo <table.csv> [config.json]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kline_core::composite::{KDJ_SLOT, MACD_SLOT};
use kline_core::{CompositeLayout, JsonAdapter, KlineConfig, OhlcvTable, RenderAdapter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "kline.csv".to_string());
    let config = match args.next() {
        Some(cfg) => KlineConfig::from_path(&cfg).with_context(|| format!("failed to load config '{cfg}'"))?,
        None => KlineConfig::default(),
    };

    let (path, used_alt) = resolve_path(&raw)?;
    info!(input = %path.display(), "using input file");
    if used_alt {
        info!("extension swapped between .csv/.cvs");
    }

    let table = OhlcvTable::from_csv_path(&path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    info!(rows = table.len(), "loaded ohlcv table");

    let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("kline").to_string();
    let layout = CompositeLayout::build(title, &table, &config);
    log_summary(&layout);

    let adapter = JsonAdapter::pretty();
    let out = out_name_with(&path, "composite");
    adapter.write_composite(&layout, &out)?;
    info!(output = %out.display(), "wrote composite layout");

    let bytes = adapter.render_composite(&layout)?.len();
    info!(bytes, "description size");
    Ok(())
}

fn log_summary(layout: &CompositeLayout) {
    let visible = layout.visible_range();
    info!(
        panels = layout.panels().len(),
        start = visible.start,
        end = visible.end,
        "zoom window"
    );
    let last = |slot: usize, name: &str| {
        layout
            .panel(slot)
            .and_then(|p| p.series_named(name))
            .and_then(|s| s.line_values())
            .and_then(|v| v.last().copied().flatten())
    };
    match (last(MACD_SLOT, "DIF"), last(MACD_SLOT, "DEA")) {
        (Some(diff), Some(signal)) => info!(diff, signal, "latest MACD"),
        _ => warn!("not enough history for MACD"),
    }
    match (last(KDJ_SLOT, "K"), last(KDJ_SLOT, "D"), last(KDJ_SLOT, "J")) {
        (Some(k), Some(d), Some(j)) => info!(k, d, j, "latest KDJ"),
        _ => warn!("not enough history for KDJ"),
    }
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Produce output file name like target/out/kline_<stem>_<suffix>.json
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("kline");
    let mut out = PathBuf::from("target/out");
    if stem.is_empty() {
        out.push(format!("kline_{suffix}.json"));
    } else {
        out.push(format!("kline_{stem}_{suffix}.json"));
    }
    out
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
