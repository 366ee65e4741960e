use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a string cannot be read as a timecode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timecode {input:?}: {reason}")]
pub struct TimecodeError {
    pub input: String,
    pub reason: &'static str,
}

impl TimecodeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A point in media time, stored as seconds.
///
/// This is the one time representation used throughout the crate: entry
/// starts, plan boundaries and the probed source duration are all `Timecode`s,
/// so the final clip boundary is formatted exactly like every other value.
///
/// Parses from plain seconds (`"90"`, `"90.5"`), `MM:SS` or `HH:MM:SS` with
/// an optional fractional seconds part. Displays as `HH:MM:SS.mmm`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Timecode(f64);

impl Timecode {
    pub fn from_secs_f64(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimecodeError::new(s, "empty string"));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > 3 {
            return Err(TimecodeError::new(s, "expected [HH:]MM:SS or seconds"));
        }

        // All leading components are whole hours/minutes; only the seconds
        // component may carry a fraction.
        let mut total = 0.0;
        for part in &parts[..parts.len() - 1] {
            let value: u64 = part
                .parse()
                .map_err(|_| TimecodeError::new(s, "non-numeric component"))?;
            total = total * 60.0 + value as f64;
        }

        let seconds_part = parts[parts.len() - 1];
        let seconds: f64 = seconds_part
            .parse()
            .map_err(|_| TimecodeError::new(s, "non-numeric seconds"))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TimecodeError::new(s, "seconds out of range"));
        }

        Ok(Self(total * 60.0 + seconds))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.0 as u64;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;
        let millis = ((self.0 - total_seconds as f64) * 1000.0) as u32;

        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!("90".parse::<Timecode>().unwrap().as_secs_f64(), 90.0);
        assert_eq!("90.5".parse::<Timecode>().unwrap().as_secs_f64(), 90.5);
    }

    #[test]
    fn parses_minutes_and_hours() {
        assert_eq!("01:30".parse::<Timecode>().unwrap().as_secs_f64(), 90.0);
        assert_eq!("00:01:30".parse::<Timecode>().unwrap().as_secs_f64(), 90.0);
        assert_eq!(
            "01:01:05.250".parse::<Timecode>().unwrap().as_secs_f64(),
            3665.25
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<Timecode>().is_err());
        assert!("abc".parse::<Timecode>().is_err());
        assert!("1:2:3:4".parse::<Timecode>().is_err());
        assert!("-5".parse::<Timecode>().is_err());
        assert!("-1:30".parse::<Timecode>().is_err());
        assert!("1.5:30".parse::<Timecode>().is_err());
    }

    #[test]
    fn displays_as_hms_millis() {
        assert_eq!(Timecode::from_secs_f64(125.5).to_string(), "00:02:05.500");
        assert_eq!(Timecode::from_secs_f64(3665.0).to_string(), "01:01:05.000");
        assert_eq!(Timecode::from_secs_f64(900.0).to_string(), "00:15:00.000");
    }

    #[test]
    fn parse_display_round_trip() {
        let tc: Timecode = "00:02:05.500".parse().unwrap();
        assert_eq!(tc.to_string(), "00:02:05.500");
    }
}
