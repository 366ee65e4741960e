pub mod ffmpeg;

use std::path::Path;

use thiserror::Error;

use crate::timecode::Timecode;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to initialize backend: {0}")]
    Initialization(String),
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: &'static str,
        source: std::io::Error,
    },
    #[error("probe failed: {0}")]
    Probe(String),
    #[error("duration unavailable: {0}")]
    DurationUnavailable(String),
    #[error("cut failed for {output}: {message}")]
    Cut { output: String, message: String },
}

/// The external media tool, seen from the core as two capabilities: report
/// the source's total duration, and copy one time-bounded segment out of it.
///
/// The core never inspects the tool's output beyond success/failure and never
/// retries; a trait boundary here lets the planner and runner be exercised
/// with a canned backend instead of a real subprocess.
pub trait MediaBackend {
    /// Total duration of the source, in seconds
    fn probe_duration(&self, source: &Path) -> Result<f64, BackendError>;

    /// Write the `start..end` segment of `source` to `output`
    fn cut(
        &self,
        source: &Path,
        start: Timecode,
        end: Timecode,
        output: &Path,
    ) -> Result<(), BackendError>;
}
