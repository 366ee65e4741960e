use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use super::{BackendError, MediaBackend};
use crate::timecode::Timecode;

/// Shape of the ffprobe `-show_format -print_format json` document. ffprobe
/// encodes the duration as a JSON string, e.g. `"900.000000"`.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<FormatSection>,
}

#[derive(Debug, Deserialize)]
struct FormatSection {
    duration: Option<String>,
}

fn parse_probe_output(stdout: &[u8]) -> Result<f64, BackendError> {
    let probe: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| BackendError::DurationUnavailable(format!("malformed probe output: {e}")))?;

    let duration = probe
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| {
            BackendError::DurationUnavailable("probe output has no format.duration field".into())
        })?;

    duration.parse::<f64>().map_err(|_| {
        BackendError::DurationUnavailable(format!("non-numeric duration {duration:?}"))
    })
}

/// Media backend that shells out to ffmpeg/ffprobe
pub struct FfmpegBackend {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegBackend {
    pub fn new() -> Result<Self, BackendError> {
        Ok(Self {
            ffmpeg_path: find_executable("ffmpeg")?,
            ffprobe_path: find_executable("ffprobe")?,
        })
    }

    /// Use explicit executable locations instead of searching PATH
    pub fn with_paths(
        ffmpeg_path: impl Into<String>,
        ffprobe_path: impl Into<String>,
    ) -> Result<Self, BackendError> {
        let ffmpeg_path = ffmpeg_path.into();
        let ffprobe_path = ffprobe_path.into();

        for path in [&ffmpeg_path, &ffprobe_path] {
            if !Path::new(path).exists() {
                return Err(BackendError::Initialization(format!(
                    "executable not found at: {path}"
                )));
            }
        }

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }
}

fn find_executable(name: &'static str) -> Result<String, BackendError> {
    if let Ok(output) = Command::new("which").arg(name).output() {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                return Ok(path);
            }
        }
    }

    // Common locations, falling back to bare PATH lookup
    let candidates = [
        format!("/usr/bin/{name}"),
        format!("/usr/local/bin/{name}"),
        format!("/opt/homebrew/bin/{name}"),
    ];
    for candidate in candidates {
        if Path::new(&candidate).exists() {
            return Ok(candidate);
        }
    }

    Ok(name.to_string())
}

impl MediaBackend for FfmpegBackend {
    fn probe_duration(&self, source: &Path) -> Result<f64, BackendError> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-loglevel", "quiet", "-show_format", "-print_format", "json"])
            .arg(source)
            .output()
            .map_err(|source| BackendError::Launch {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Probe(format!(
                "ffprobe exited with {} for {}: {}",
                output.status,
                source.display(),
                stderr.trim()
            )));
        }

        parse_probe_output(&output.stdout)
    }

    fn cut(
        &self,
        source: &Path,
        start: Timecode,
        end: Timecode,
        output_path: &Path,
    ) -> Result<(), BackendError> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-loglevel", "error", "-i"])
            .arg(source)
            .args(["-ss", &start.to_string(), "-to", &end.to_string(), "-y"])
            .arg(output_path)
            .output()
            .map_err(|source| BackendError::Launch {
                tool: "ffmpeg",
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Cut {
                output: output_path.display().to_string(),
                message: format!("ffmpeg exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
