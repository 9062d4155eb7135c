// File: crates/race-core/tests/smoke.rs
// Purpose: Basic end-to-end renders: PNG on disk, RGBA buffer shape, bar placement.

use race_core::{BarChartRace, Insets, RenderOptions, Table, TableOptions, Theme};

fn small_race(csv: &str, draw_labels: bool) -> BarChartRace {
    let table = Table::from_reader(csv.as_bytes(), &TableOptions::default()).expect("table");
    let opts = RenderOptions {
        width: 200,
        height: 100,
        insets: Insets::new(20, 20, 10, 10),
        draw_labels,
        ..RenderOptions::default()
    };
    BarChartRace::new(table, opts).expect("race")
}

#[test]
fn render_smoke_png() {
    let mut race = small_race("Country,2000,2001\nA,1,3\nB,2,1\n", true);
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("frames/2001.png");

    race.render_to_png("2001", &out).expect("render should succeed");
    let bytes = std::fs::read(&out).expect("output exists");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_rgba8_buffer() {
    let mut race = small_race("Country,2000\nA,1\n", false);
    race.render_frame("2000").expect("render");
    let frame = race.snapshot_rgba().expect("rgba");
    assert_eq!((frame.width, frame.height), (200, 100));
    assert_eq!(frame.pixels.len(), frame.stride() * 100);
    // Opaque background in the corner
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn smallest_bar_is_drawn_at_the_bottom() {
    // Two bars: A (small) bottom half, B (large) top half.
    let mut race = small_race("Country,2000\nB,10\nA,1\n", false);
    race.render_frame("2000").expect("render");
    let frame = race.snapshot_rgba().expect("rgba");
    let b_color = race.color_of("B").expect("B colored");
    let a_color = race.color_of("A").expect("A colored");

    // x just right of the axis; y at the center of each bar slot (plot spans 10..90).
    let top = frame.pixel(40, 30).expect("in frame");
    let bottom = frame.pixel(22, 70).expect("in frame");
    assert_eq!(top, [b_color.r(), b_color.g(), b_color.b(), 255]);
    assert_eq!(bottom, [a_color.r(), a_color.g(), a_color.b(), 255]);
}

#[test]
fn resize_changes_snapshot_size() {
    let mut race = small_race("Country,2000\nA,1\n", false);
    race.resize(64, 48).expect("resize");
    race.render_frame("2000").expect("render");
    let frame = race.snapshot_rgba().expect("rgba");
    assert_eq!((frame.width, frame.height), (64, 48));
    assert!(race.resize(0, 10).is_err());
}

#[test]
fn dark_theme_background() {
    let table = Table::from_reader("Country,2000\nA,1\n".as_bytes(), &TableOptions::default()).expect("table");
    let opts = RenderOptions { width: 50, height: 50, theme: Theme::dark(), draw_labels: false, ..RenderOptions::default() };
    let mut race = BarChartRace::new(table, opts).expect("race");
    race.render_frame("2000").expect("render");
    assert_eq!(race.snapshot_rgba().expect("rgba").pixel(0, 0), Some([18, 18, 20, 255]));
}
