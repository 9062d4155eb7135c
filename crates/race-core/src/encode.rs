// File: crates/race-core/src/encode.rs
// Summary: Animated GIF encoders: external ImageMagick (default) and in-process `image` GIF.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use tracing::{debug, info};

use crate::animation::AnimationOptions;
use crate::error::{RaceError, Result};
use crate::types::RgbaFrame;

/// Streaming sink for rendered frames. `begin` → `add_frame`* → `finish`.
pub trait AnimationEncoder {
    fn name(&self) -> &str;
    fn begin(&mut self, out: &Path, opts: &AnimationOptions) -> Result<()>;
    fn add_frame(&mut self, frame: &RgbaFrame) -> Result<()>;
    /// Write the artifact. Fails rather than leaving an empty file behind.
    fn finish(&mut self) -> Result<()>;
}

/// Directory that will hold `out`; "" (bare file name) means the working directory.
fn output_dir(out: &Path) -> PathBuf {
    match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ---- ImageMagick ------------------------------------------------------------

/// Shells out to ImageMagick: frames go to a temp dir as PNG, then one `-delay … -loop …` call.
pub struct ImageMagick {
    candidates: Vec<PathBuf>,
    job: Option<MagickJob>,
}

struct MagickJob {
    program: PathBuf,
    dir: tempfile::TempDir,
    frames: Vec<PathBuf>,
    out: PathBuf,
    delay_cs: u32,
    repeat: bool,
}

impl Default for ImageMagick {
    fn default() -> Self { Self::new() }
}

impl ImageMagick {
    /// Try `magick` (v7) first, then `convert` (v6).
    pub fn new() -> Self {
        Self { candidates: vec![PathBuf::from("magick"), PathBuf::from("convert")], job: None }
    }

    /// Use exactly `program`; no fallback.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { candidates: vec![program.into()], job: None }
    }

    /// First candidate that runs `-version` successfully.
    pub fn locate(&self) -> Result<PathBuf> {
        for program in &self.candidates {
            let status = Command::new(program)
                .arg("-version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(s) if s.success() => return Ok(program.clone()),
                Ok(s) => debug!(program = %program.display(), ?s, "encoder probe exited non-zero"),
                Err(e) => debug!(program = %program.display(), error = %e, "encoder probe failed to spawn"),
            }
        }
        Err(RaceError::EncoderUnavailable { tried: self.candidates.clone() })
    }
}

/// ImageMagick's `-delay` is in hundredths of a second.
pub fn centiseconds(d: Duration) -> u32 {
    ((d.as_millis() + 5) / 10).max(1) as u32
}

impl AnimationEncoder for ImageMagick {
    fn name(&self) -> &str { "imagemagick" }

    fn begin(&mut self, out: &Path, opts: &AnimationOptions) -> Result<()> {
        // Probe before any frame is rendered so a missing tool fails fast.
        let program = self.locate()?;
        let dir = tempfile::Builder::new().prefix("gdp-race-frames").tempdir()?;
        debug!(program = %program.display(), dir = %dir.path().display(), "imagemagick job");
        self.job = Some(MagickJob {
            program,
            dir,
            frames: Vec::new(),
            out: out.to_path_buf(),
            delay_cs: centiseconds(opts.interval),
            repeat: opts.repeat,
        });
        Ok(())
    }

    fn add_frame(&mut self, frame: &RgbaFrame) -> Result<()> {
        let job = self.job.as_mut().ok_or_else(|| RaceError::encoder("imagemagick", "add_frame before begin"))?;
        let path = job.dir.path().join(format!("frame_{:05}.png", job.frames.len()));
        let img = frame
            .clone()
            .into_image()
            .ok_or_else(|| RaceError::encoder("imagemagick", "frame buffer size mismatch"))?;
        img.save(&path)?;
        job.frames.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let job = self.job.take().ok_or_else(|| RaceError::encoder("imagemagick", "finish before begin"))?;
        let program = job.program.display().to_string();
        if job.frames.is_empty() {
            return Err(RaceError::encoder(program, "no frames to encode"));
        }

        let staged = job.dir.path().join("animation.gif");
        let output = Command::new(&job.program)
            .arg("-delay")
            .arg(job.delay_cs.to_string())
            .arg("-loop")
            .arg(if job.repeat { "0" } else { "1" })
            .args(&job.frames)
            .arg(&staged)
            .output()?;
        if !output.status.success() || !staged.exists() {
            return Err(RaceError::EncoderFailed {
                program,
                status: Some(output.status),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        std::fs::create_dir_all(output_dir(&job.out))?;
        // rename fails across filesystems (tmpfs → disk); fall back to a copy
        if std::fs::rename(&staged, &job.out).is_err() {
            std::fs::copy(&staged, &job.out)?;
        }
        info!(path = %job.out.display(), frames = job.frames.len(), "saved animation via {program}");
        Ok(())
    }
}

// ---- in-process GIF ---------------------------------------------------------

/// Pure-Rust GIF encoding through the `image` crate; needs no external tool.
pub struct BuiltinGif {
    speed: i32,
    job: Option<GifJob>,
}

struct GifJob {
    encoder: GifEncoder<File>,
    staged: tempfile::NamedTempFile,
    out: PathBuf,
    delay: image::Delay,
    frames: usize,
}

impl Default for BuiltinGif {
    fn default() -> Self { Self::new() }
}

impl BuiltinGif {
    pub fn new() -> Self {
        Self { speed: 10, job: None }
    }

    /// Quantizer speed, 1 (best) ..= 30 (fastest).
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }
}

impl AnimationEncoder for BuiltinGif {
    fn name(&self) -> &str { "builtin" }

    fn begin(&mut self, out: &Path, opts: &AnimationOptions) -> Result<()> {
        let dir = output_dir(out);
        std::fs::create_dir_all(&dir)?;
        // Staged next to the target so persist() is a same-filesystem rename.
        let staged = tempfile::Builder::new().prefix(".gdp-race").suffix(".gif").tempfile_in(&dir)?;
        let mut encoder = GifEncoder::new_with_speed(staged.reopen()?, self.speed);
        if opts.repeat {
            encoder.set_repeat(Repeat::Infinite)?;
        }
        let ms = opts.interval.as_millis().min(u32::MAX as u128) as u32;
        self.job = Some(GifJob {
            encoder,
            staged,
            out: out.to_path_buf(),
            delay: image::Delay::from_numer_denom_ms(ms, 1),
            frames: 0,
        });
        Ok(())
    }

    fn add_frame(&mut self, frame: &RgbaFrame) -> Result<()> {
        let job = self.job.as_mut().ok_or_else(|| RaceError::encoder("builtin", "add_frame before begin"))?;
        let img = frame
            .clone()
            .into_image()
            .ok_or_else(|| RaceError::encoder("builtin", "frame buffer size mismatch"))?;
        job.encoder.encode_frame(image::Frame::from_parts(img, 0, 0, job.delay))?;
        job.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let job = self.job.take().ok_or_else(|| RaceError::encoder("builtin", "finish before begin"))?;
        let GifJob { encoder, staged, out, frames, .. } = job;
        if frames == 0 {
            return Err(RaceError::encoder("builtin", "no frames to encode"));
        }
        // Dropping the encoder writes the GIF trailer.
        drop(encoder);
        staged.as_file().sync_all()?;
        staged.persist(&out).map_err(|e| RaceError::Io(e.error))?;
        info!(path = %out.display(), frames, "saved animation via builtin gif encoder");
        Ok(())
    }
}
