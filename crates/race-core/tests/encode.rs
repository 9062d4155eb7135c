// File: crates/race-core/tests/encode.rs
// Purpose: Save-mode behavior: missing external encoder fails loudly, builtin GIF holds one frame per period.

use std::io::BufReader;
use std::time::Duration;

use image::AnimationDecoder;
use race_core::{
    AnimationOptions, BarChartRace, BuiltinGif, GifRecorder, ImageMagick, Insets, RaceError, RenderOptions, Table,
    TableOptions,
};

fn race(csv: &str) -> BarChartRace {
    let table = Table::from_reader(csv.as_bytes(), &TableOptions::default()).expect("table");
    let opts = RenderOptions {
        width: 80,
        height: 60,
        insets: Insets::new(8, 8, 8, 8),
        draw_labels: false,
        ..RenderOptions::default()
    };
    BarChartRace::new(table, opts).expect("race")
}

#[test]
fn missing_imagemagick_fails_without_writing_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("chart.gif");
    let mut race = race("Country,2000,2001\nA,1,2\nB,2,1\n");
    let mut recorder = GifRecorder::new(ImageMagick::with_program("gdp-race-no-such-encoder"), &out);

    let err = race.run(&mut recorder, &AnimationOptions::default()).expect_err("save must fail");
    match err {
        RaceError::EncoderUnavailable { tried } => {
            assert_eq!(tried, vec![std::path::PathBuf::from("gdp-race-no-such-encoder")]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists(), "no artifact on failure");
}

#[test]
fn builtin_gif_has_one_frame_per_period() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested/chart.gif");
    let mut race = race("Country,1990,1991,1992\nA,1,2,3\nB,3,2,1\n");
    let mut recorder = GifRecorder::new(BuiltinGif::new().with_speed(30), &out);
    let opts = AnimationOptions { interval: Duration::from_millis(200), repeat: true };

    race.run(&mut recorder, &opts).expect("save");

    let file = std::fs::File::open(&out).expect("gif written");
    let decoder = image::codecs::gif::GifDecoder::new(BufReader::new(file)).expect("decode gif");
    let frames = decoder.into_frames().collect_frames().expect("frames");
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (80, 60));
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 200);

    // Staging file was persisted, nothing else left behind.
    let leftovers = std::fs::read_dir(out.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}
