use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timecode::{Timecode, TimecodeError};

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("cannot read timestamp file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed timestamp file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid start time {key:?}: {source}")]
    InvalidStart { key: String, source: TimecodeError },
    #[error("start time key {key:?} is not a time expression")]
    UnsupportedKey { key: String },
    #[error("label for start time {key:?} must be a string")]
    NonStringLabel { key: String },
}

/// One split point: where a clip starts and what it should be called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimestampEntry {
    pub start: Timecode,
    pub label: String,
}

/// The ordered list of split points defining the clips.
///
/// Loaded from a YAML mapping of `start time: label`. Insertion order is
/// load-bearing (each entry ends where the next one starts), so the document
/// is read as an ordered mapping rather than an associative container.
/// Duplicate keys are rejected at parse time instead of silently collapsing
/// into one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimestampEntry>,
}

impl Timeline {
    pub fn from_entries(entries: Vec<TimestampEntry>) -> Self {
        Self { entries }
    }

    /// Load a timeline from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a timeline from a YAML mapping string
    pub fn from_yaml(content: &str) -> Result<Self, TimelineError> {
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(content)?;

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let start = match &key {
                serde_yaml::Value::String(s) => {
                    s.parse::<Timecode>()
                        .map_err(|source| TimelineError::InvalidStart {
                            key: s.clone(),
                            source,
                        })?
                }
                serde_yaml::Value::Number(n) => {
                    let seconds = n.as_f64().unwrap_or(-1.0);
                    if seconds < 0.0 {
                        return Err(TimelineError::UnsupportedKey { key: n.to_string() });
                    }
                    Timecode::from_secs_f64(seconds)
                }
                other => {
                    return Err(TimelineError::UnsupportedKey {
                        key: format!("{other:?}"),
                    });
                }
            };

            let label = match value {
                serde_yaml::Value::String(s) => s,
                _ => {
                    return Err(TimelineError::NonStringLabel {
                        key: start.to_string(),
                    });
                }
            };

            entries.push(TimestampEntry { start, label });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TimestampEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
