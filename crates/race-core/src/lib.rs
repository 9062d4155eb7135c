// File: crates/race-core/src/lib.rs
// Summary: Core library entry point; load a CSV table, sort per period, render bars, record or play the race.

pub mod animation;
pub mod chart;
pub mod color;
pub mod encode;
pub mod error;
pub mod frame;
pub mod grid;
pub mod table;
pub mod text;
pub mod theme;
pub mod types;

pub use animation::{AnimationOptions, FrameClock, GifRecorder, Playback, DEFAULT_OUTPUT};
pub use chart::{BarChartRace, ChartLabels, RenderOptions};
pub use color::ColorScheme;
pub use encode::{AnimationEncoder, BuiltinGif, ImageMagick};
pub use error::{RaceError, Result};
pub use frame::{format_value_label, Frame, FrameBar, ValueFormat};
pub use table::{Table, TableOptions};
pub use text::TextShaper;
pub use theme::Theme;
pub use types::{Insets, RgbaFrame};
