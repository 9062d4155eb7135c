// File: crates/race-core/src/error.rs
// Summary: Error taxonomy for loading, frame lookup, rendering and encoding.

use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, RaceError>;

#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    // ---- input ---------------------------------------------------------------
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected first column '{expected}', found '{found}'")]
    MissingColumn { expected: String, found: String },

    #[error("invalid value '{raw}' for entity '{entity}' in period '{period}'")]
    InvalidValue { entity: String, period: String, raw: String },

    #[error("period '{0}' appears more than once in the header")]
    DuplicatePeriod(String),

    #[error("table has no period columns after the entity column")]
    NoPeriods,

    #[error("table has no data rows")]
    Empty,

    // ---- lookup --------------------------------------------------------------
    #[error("unknown period '{0}'")]
    UnknownPeriod(String),

    // ---- rendering -----------------------------------------------------------
    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("viewer error: {0}")]
    Viewer(String),

    // ---- encoding ------------------------------------------------------------
    #[error("animation encoder unavailable: tried {tried:?}")]
    EncoderUnavailable { tried: Vec<PathBuf> },

    #[error("encoder '{program}' failed ({status:?}): {stderr}")]
    EncoderFailed {
        program: String,
        status: Option<ExitStatus>,
        stderr: String,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl RaceError {
    /// Shorthand for encoder failures that have no process status.
    pub(crate) fn encoder(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::EncoderFailed { program: program.into(), status: None, stderr: msg.into() }
    }
}
