// File: crates/race-cli/src/main.rs
// Summary: CLI entry: parse flags, set up logging, load the table, then display or save the race.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use race_core::{
    AnimationOptions, BarChartRace, BuiltinGif, ColorScheme, GifRecorder, ImageMagick, Playback, RenderOptions,
    TableOptions, DEFAULT_OUTPUT,
};
use race_window::WindowPlayback;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gdp-race")]
#[command(about = "Animated horizontal bar chart of per-country values over time")]
struct Cli {
    /// CSV with an entity column followed by one column per period
    #[arg(value_name = "CSV", default_value = "gdp_sample.csv")]
    input: PathBuf,

    /// Save the animation instead of opening a window
    #[arg(long)]
    save: bool,

    /// Output file for --save
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Delay between frames, in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Stop on the last period instead of looping
    #[arg(long)]
    no_repeat: bool,

    /// GIF encoder used by --save
    #[arg(long, value_enum, default_value_t = Encoder::Imagemagick)]
    encoder: Encoder,

    /// Explicit ImageMagick program (skips the magick/convert lookup)
    #[arg(long, value_name = "PROGRAM")]
    magick: Option<PathBuf>,

    /// Color theme
    #[arg(long, default_value = "light")]
    theme: String,

    /// How bar colors are assigned to entities
    #[arg(long, value_enum, default_value_t = Colors::Hashed)]
    colors: Colors,

    /// Name of the first column (after "Country Name" → "Country" normalization)
    #[arg(long, default_value = "Country")]
    entity_column: String,

    #[arg(long, default_value_t = race_core::types::WIDTH)]
    width: i32,

    #[arg(long, default_value_t = race_core::types::HEIGHT)]
    height: i32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Encoder {
    /// External ImageMagick tool
    Imagemagick,
    /// In-process GIF encoder
    Builtin,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Colors {
    Hashed,
    Tab20,
}

impl From<Colors> for ColorScheme {
    fn from(c: Colors) -> Self {
        match c {
            Colors::Hashed => ColorScheme::Hashed,
            Colors::Tab20 => ColorScheme::Tab20,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let table_opts = TableOptions { entity_column: cli.entity_column.clone() };
    let render_opts = RenderOptions {
        width: cli.width,
        height: cli.height,
        theme: race_core::theme::find(&cli.theme),
        colors: cli.colors.into(),
        ..RenderOptions::default()
    };
    let mut race = BarChartRace::from_path(&cli.input, &table_opts, render_opts)
        .with_context(|| format!("failed to load CSV '{}'", cli.input.display()))?;
    info!(periods = race.periods().len(), entities = race.table().len(), "race ready");

    let anim = AnimationOptions { interval: Duration::from_millis(cli.interval_ms), repeat: !cli.no_repeat };
    run(&mut race, &cli, &anim)
}

/// Save to a GIF when `--save` is set, otherwise block on the window until it is closed.
fn run(race: &mut BarChartRace, cli: &Cli, anim: &AnimationOptions) -> Result<()> {
    let mut playback: Box<dyn Playback> = if cli.save {
        match (cli.encoder, &cli.magick) {
            (Encoder::Imagemagick, Some(program)) => {
                Box::new(GifRecorder::new(ImageMagick::with_program(program), &cli.output))
            }
            (Encoder::Imagemagick, None) => Box::new(GifRecorder::new(ImageMagick::new(), &cli.output)),
            (Encoder::Builtin, _) => Box::new(GifRecorder::new(BuiltinGif::new(), &cli.output)),
        }
    } else {
        Box::new(WindowPlayback::default())
    };

    race.run(playback.as_mut(), anim).with_context(|| {
        if cli.save {
            format!("failed to save animation to '{}'", cli.output.display())
        } else {
            "interactive display failed".to_string()
        }
    })?;
    if cli.save {
        info!(path = %cli.output.display(), "saved");
    }
    Ok(())
}
