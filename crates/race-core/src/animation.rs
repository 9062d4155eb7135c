// File: crates/race-core/src/animation.rs
// Summary: Playback seam (window vs. recorder), GIF recorder, and the frame tick scheduler.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::chart::BarChartRace;
use crate::encode::AnimationEncoder;
use crate::error::Result;

/// Default output artifact in the working directory.
pub const DEFAULT_OUTPUT: &str = "chart.gif";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Delay between frames.
    pub interval: Duration,
    /// Start over after the last period.
    pub repeat: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self { interval: Duration::from_millis(500), repeat: true }
    }
}

/// Drives a race through all of its periods, one `render_frame` per tick.
pub trait Playback {
    fn play(&mut self, race: &mut BarChartRace, opts: &AnimationOptions) -> Result<()>;
}

/// Save mode: renders every period once, in column order, into an encoder.
pub struct GifRecorder<E> {
    encoder: E,
    output: PathBuf,
}

impl<E: AnimationEncoder> GifRecorder<E> {
    pub fn new(encoder: E, output: impl Into<PathBuf>) -> Self {
        Self { encoder, output: output.into() }
    }

    pub fn output(&self) -> &Path { &self.output }
}

impl<E: AnimationEncoder> Playback for GifRecorder<E> {
    fn play(&mut self, race: &mut BarChartRace, opts: &AnimationOptions) -> Result<()> {
        let periods = race.periods().to_vec();
        info!(
            encoder = self.encoder.name(),
            frames = periods.len(),
            path = %self.output.display(),
            "recording animation"
        );
        self.encoder.begin(&self.output, opts)?;
        for period in &periods {
            race.render_frame(period)?;
            let frame = race.snapshot_rgba()?;
            self.encoder.add_frame(&frame)?;
        }
        self.encoder.finish()
    }
}

/// Which frame is on screen and when the next one is due.
#[derive(Clone, Debug)]
pub struct FrameClock {
    frames: usize,
    index: usize,
    interval: Duration,
    repeat: bool,
    next: Instant,
}

impl FrameClock {
    pub fn new(frames: usize, opts: &AnimationOptions, now: Instant) -> Self {
        Self { frames, index: 0, interval: opts.interval, repeat: opts.repeat, next: now + opts.interval }
    }

    pub fn index(&self) -> usize { self.index }

    /// No further frame changes will happen.
    pub fn is_finished(&self) -> bool {
        self.frames <= 1 || (!self.repeat && self.index + 1 >= self.frames)
    }

    /// When the next frame is due, or `None` once finished.
    pub fn deadline(&self) -> Option<Instant> {
        (!self.is_finished()).then_some(self.next)
    }

    /// Advance if the deadline has passed. Returns true when the frame index changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_finished() || now < self.next {
            return false;
        }
        self.index = (self.index + 1) % self.frames;
        self.next += self.interval;
        if self.next <= now {
            // fell behind (e.g. window dragged); resync instead of bursting
            self.next = now + self.interval;
        }
        debug!(index = self.index, "frame tick");
        true
    }
}
