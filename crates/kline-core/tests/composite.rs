// File: crates/kline-core/tests/composite.rs
// Purpose: Composite layout structure, determinism, boundaries and axis synchronization.

use chrono::{Days, NaiveDate};
use kline_core::composite::{CANDLESTICK_SLOT, KDJ_SLOT, MACD_SLOT, PANEL_COUNT, VOLUME_SLOT};
use kline_core::series::SeriesKind;
use kline_core::sync::AxisEvent;
use kline_core::{
    AxisBinding, Chart, CompositeLayout, DataValidationError, JMode, JsonAdapter, KlineConfig, OhlcvRow, OhlcvTable,
    RenderAdapter, Sign, SyncError, SyncEvent, ZoomControl, ZoomRange,
};

fn rows(n: usize) -> Vec<OhlcvRow> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut prev = 100.0;
    (0..n)
        .map(|i| {
            let date = start.checked_add_days(Days::new(i as u64)).unwrap();
            let close = 100.0 + 6.0 * (i as f64 * 0.41).sin() + 0.2 * i as f64;
            let open = prev;
            let row = OhlcvRow::new(
                date.format("%Y-%m-%d").to_string(),
                open,
                close,
                open.min(close) - 0.7,
                open.max(close) + 0.9,
                prev,
                1_000.0 + 37.0 * (i % 11) as f64,
            );
            prev = close;
            row
        })
        .collect()
}

fn layout(n: usize) -> CompositeLayout {
    CompositeLayout::from_rows("test", rows(n), &KlineConfig::default()).expect("valid rows")
}

fn names(layout: &CompositeLayout, slot: usize) -> Vec<String> {
    layout.panel(slot).unwrap().series.iter().map(|s| s.name.clone()).collect()
}

#[test]
fn four_panels_in_slot_order() {
    let l = layout(60);
    assert_eq!(l.panels().len(), PANEL_COUNT);
    let titles: Vec<&str> = l.panels().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["CANDLESTICK", "VOLUME", "MACD", "KDJ"]);

    for (slot, panel) in l.panels().iter().enumerate() {
        assert_eq!(panel.axes.x_axis_index, slot);
        assert_eq!(panel.axes.y_axis_index, slot);
        for s in &panel.series {
            assert_eq!(s.axes, panel.axes, "series {} drawn on a foreign axis", s.name);
            assert_eq!(s.len(), 60, "series {} misaligned", s.name);
        }
    }

    assert_eq!(names(&l, CANDLESTICK_SLOT), ["candle", "MA1", "MA5", "MA10", "MA20", "MA30"]);
    assert_eq!(names(&l, VOLUME_SLOT), ["volume", "VMA5", "VMA10"]);
    assert_eq!(names(&l, MACD_SLOT), ["HIST", "DIF", "DEA"]);
    assert_eq!(names(&l, KDJ_SLOT), ["K", "D", "J"]);

    let candle = l.panel(CANDLESTICK_SLOT).unwrap().series_named("candle").unwrap();
    assert_eq!(candle.kind(), SeriesKind::Candlestick);
    assert_eq!(l.panel(MACD_SLOT).unwrap().series_named("HIST").unwrap().kind(), SeriesKind::Bar);
    assert_eq!(l.dates().len(), 60);
    assert_eq!(l.dates()[0], "2024-01-02");
}

#[test]
fn stacked_panels_hide_labels_and_place_legends() {
    let l = layout(40);
    let price = l.panel(CANDLESTICK_SLOT).unwrap();
    assert!(price.x_axis.show_labels && price.y_axis.show_labels);
    assert!(price.y_axis.split_area);
    assert_eq!(price.legend.top_percent, None);

    let tops: Vec<Option<f64>> = l.panels()[1..].iter().map(|p| p.legend.top_percent).collect();
    assert_eq!(tops, [Some(41.0), Some(57.0), Some(78.0)]);
    for p in &l.panels()[1..] {
        assert!(!p.x_axis.show_labels && !p.y_axis.show_labels, "{} should hide labels", p.title);
    }

    let bands: Vec<(f64, f64)> = l.bands().iter().map(|b| (b.top_percent, b.height_percent)).collect();
    assert_eq!(bands, [(5.0, 30.0), (41.0, 15.0), (57.0, 20.0), (78.0, 15.0)]);
    for pair in l.bands().windows(2) {
        assert!(pair[0].bottom_percent() <= pair[1].top_percent);
    }
    assert_eq!(l.canvas().height_px, 800);
    assert!(!l.canvas().animation);
}

#[test]
fn sync_group_spans_every_panel() {
    let l = layout(40);
    let sync = l.sync();
    assert_eq!(sync.axes(), &[0, 1, 2, 3]);
    assert_eq!(sync.zoom().start_percent(), 90.0);
    assert_eq!(sync.zoom().end_percent(), 100.0);
    assert_eq!(sync.controls(), &[ZoomControl::Slider, ZoomControl::Inside]);
    assert!(sync.link_pointer());
}

#[test]
fn building_twice_gives_identical_output() {
    let table = OhlcvTable::from_rows(rows(80)).unwrap();
    let cfg = KlineConfig::default();
    let a = CompositeLayout::build("twice", &table, &cfg);
    let b = CompositeLayout::build("twice", &table, &cfg);
    assert_eq!(a, b);

    let json = JsonAdapter::default();
    assert_eq!(json.render_composite(&a).unwrap(), json.render_composite(&b).unwrap());
}

#[test]
fn composite_j_differs_from_standalone_default() {
    let table = OhlcvTable::from_rows(rows(60)).unwrap();
    let cfg = KlineConfig::default();
    assert_eq!(cfg.composite_j_mode, JMode::KMinusD);
    assert_eq!(cfg.kdj.j_mode, JMode::ThreeDMinusTwoK);

    let composite = CompositeLayout::build("kdj", &table, &cfg);
    let kdj = composite.panel(KDJ_SLOT).unwrap();
    let k = kdj.series_named("K").unwrap().line_values().unwrap();
    let d = kdj.series_named("D").unwrap().line_values().unwrap();
    let j = kdj.series_named("J").unwrap().line_values().unwrap();
    for i in 0..k.len() {
        match (k[i], d[i]) {
            (Some(k), Some(d)) => assert!((j[i].unwrap() - (k - d)).abs() < 1e-9),
            _ => assert!(j[i].is_none()),
        }
    }

    let standalone = Chart::kdj("KDJ", &table, &cfg);
    let sj = standalone.panel().series_named("J").unwrap().line_values().unwrap();
    let last = k.len() - 1;
    let want = 3.0 * d[last].unwrap() - 2.0 * k[last].unwrap();
    assert!((sj[last].unwrap() - want).abs() < 1e-9);
    assert_eq!(standalone.sync().axes(), &[0]);
}

#[test]
fn empty_rows_are_rejected() {
    let err = CompositeLayout::from_rows("empty", Vec::new(), &KlineConfig::default()).unwrap_err();
    assert!(matches!(err, DataValidationError::Empty));
}

#[test]
fn close_above_high_never_reaches_the_indicators() {
    let mut input: Vec<OhlcvRow> = rows(12)
        .into_iter()
        .map(|r| OhlcvRow { open: 10.0, close: 10.0, low: 9.0, high: 11.0, ..r })
        .collect();
    for r in &mut input[9..] {
        r.close = 13.0;
    }
    let err = CompositeLayout::from_rows("bad", input, &KlineConfig::default()).unwrap_err();
    assert!(matches!(err, DataValidationError::OutsideRange { index: 9, column: "close_price", .. }), "{err}");
}

#[test]
fn single_row_keeps_only_passthrough_lines() {
    let l = layout(1);
    for panel in l.panels() {
        for s in &panel.series {
            assert_eq!(s.len(), 1);
            match (s.name.as_str(), s.line_values()) {
                ("MA1", Some(values)) => assert_eq!(values[0], Some(rows(1)[0].close)),
                (name, Some(values)) => assert_eq!(values[0], None, "{name} should be undefined"),
                _ => {}
            }
        }
    }
    let hist = l.panel(MACD_SLOT).unwrap().series_named("HIST").unwrap().bar_points().unwrap();
    assert_eq!(hist[0].value, None);
    assert_eq!(hist[0].sign, Sign::Positive);
    assert_eq!(l.visible_range(), 0..1);
}

#[test]
fn display_ratio_scales_bars_not_signs() {
    let table = OhlcvTable::from_rows(rows(90)).unwrap();
    let plain = CompositeLayout::build("x1", &table, &KlineConfig::default());
    let mut cfg = KlineConfig::default();
    cfg.macd.hist_display_ratio = 2.0;
    let doubled = CompositeLayout::build("x2", &table, &cfg);

    let bars = |l: &CompositeLayout| l.panel(MACD_SLOT).unwrap().series_named("HIST").unwrap().bar_points().unwrap().to_vec();
    let (a, b) = (bars(&plain), bars(&doubled));
    assert!(a.iter().any(|p| p.value.is_some()));
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.sign, y.sign);
        assert_eq!(x.value.map(|v| v * 2.0), y.value);
    }
    // lines are untouched
    let dif = |l: &CompositeLayout| l.panel(MACD_SLOT).unwrap().series_named("DIF").unwrap().line_values().unwrap().to_vec();
    assert_eq!(dif(&plain), dif(&doubled));
}

#[test]
fn hover_and_zoom_reach_every_panel() {
    let l = layout(30);
    let hover = SyncEvent::Hover { index: 12 };
    let fanned = l.mirror(MACD_SLOT, hover).unwrap();
    let axes: Vec<usize> = fanned.iter().map(|e| e.axis).collect();
    assert_eq!(axes, [0, 1, 2, 3]);
    assert!(fanned.iter().all(|e| e.event == hover));

    let zoom = SyncEvent::Zoom { control: ZoomControl::Slider, range: ZoomRange::new(50.0, 75.0).unwrap() };
    let fanned = l.mirror(CANDLESTICK_SLOT, zoom).unwrap();
    assert_eq!(fanned.len(), PANEL_COUNT);
    assert_eq!(fanned[3], AxisEvent { axis: 3, event: zoom });

    assert_eq!(l.mirror(7, hover), Err(SyncError::UnknownAxis(7)));
    assert_eq!(
        l.mirror(KDJ_SLOT, SyncEvent::Hover { index: 30 }),
        Err(SyncError::HoverOutOfRange { index: 30, len: 30 })
    );
}

#[test]
fn zoom_window_maps_to_indices() {
    let l = layout(30);
    assert_eq!(l.visible_range(), 27..30);

    let full = l.with_zoom(ZoomRange::full());
    assert_eq!(full.visible_range(), 0..30);
    assert_eq!(full.panels(), l.panels());

    let mid = l.with_zoom(ZoomRange::new(10.0, 50.0).unwrap());
    assert_eq!(mid.visible_range(), 3..15);
    assert!(ZoomRange::new(60.0, 40.0).is_err());
    assert!(ZoomRange::new(-1.0, 40.0).is_err());
}

#[test]
fn bands_resolve_to_pixels() {
    let l = layout(10);
    let rects = l.pixel_bands(1000);
    assert_eq!(rects.len(), PANEL_COUNT);
    let r = rects[0];
    assert_eq!((r.left, r.top, r.right), (50, 40, 990));
    assert_eq!(r.height(), 240);
    assert_eq!(rects[3].top, 624);
    assert_eq!(rects[3].height(), 120);
}

#[test]
fn volume_bars_carry_change_state() {
    let input = rows(20);
    let l = CompositeLayout::from_rows("vol", input.clone(), &KlineConfig::default()).unwrap();
    let bars = l.panel(VOLUME_SLOT).unwrap().series_named("volume").unwrap().bar_points().unwrap();
    for (bar, row) in bars.iter().zip(&input) {
        assert_eq!(bar.value, Some(row.volume));
        let want = if row.close < row.prev_close { Sign::Negative } else { Sign::Positive };
        assert_eq!(bar.sign, want);
    }
}

#[test]
fn standalone_price_and_volume_charts() {
    let table = OhlcvTable::from_rows(rows(40)).unwrap();
    let cfg = KlineConfig::default();

    let price = Chart::candlestick("CANDLESTICK", &table, &cfg);
    let names: Vec<&str> = price.panel().series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["candle", "MA1", "MA5", "MA10", "MA20", "MA30"]);
    assert_eq!(price.panel().axes, AxisBinding::default());
    assert!(price.panel().series.iter().all(|s| s.axes == AxisBinding::default()));
    assert_eq!(price.dates().len(), 40);

    let volume = Chart::volume("VOLUME", &table, &cfg);
    let names: Vec<&str> = volume.panel().series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["volume", "VMA5", "VMA10"]);
    assert_eq!(volume.panel().axes, AxisBinding::default());

    for chart in [&price, &volume] {
        let sync = chart.sync();
        assert_eq!(sync.axes(), &[0]);
        assert_eq!(sync.controls(), &[ZoomControl::Slider, ZoomControl::Inside]);
        assert_eq!(*sync.zoom(), cfg.zoom);
        // standalone panels keep their labels
        assert!(chart.panel().x_axis.show_labels && chart.panel().legend.top_percent.is_none());
    }
}
