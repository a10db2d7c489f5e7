//! WebVTT cue timestamps

use crate::error::{EngineError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A point in the media timeline, millisecond precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero timestamp
    pub const ZERO: Timestamp = Timestamp(0);

    /// Build from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the start of the media
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Seconds since the start of the media
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Milliseconds from `earlier` to `self`, zero if `earlier` is later
    pub fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3_600_000;
        let minutes = (self.0 % 3_600_000) / 60_000;
        let seconds = (self.0 % 60_000) / 1000;
        let millis = self.0 % 1000;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// Parses `HH:MM:SS.fff` or `MM:SS.fff`, tolerating unpadded fields.
///
/// The fraction is read as an integer count of milliseconds (`0:0:5.5` is
/// five seconds and five milliseconds), matching how unpadded exports are
/// zero-padded by [`normalize_timestamps`].
impl FromStr for Timestamp {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidTimestamp(s.to_string());

        let (clock, fraction) = s.trim().split_once('.').ok_or_else(invalid)?;
        let fields: Vec<&str> = clock.split(':').collect();
        let (hours, minutes, seconds) = match fields.as_slice() {
            [h, m, s] => (parse_field(h)?, parse_field(m)?, parse_field(s)?),
            [m, s] => (0, parse_field(m)?, parse_field(s)?),
            _ => return Err(invalid()),
        };
        let millis = parse_field(fraction).map_err(|_| invalid())?;

        if minutes > 59 || seconds > 59 || millis > 999 {
            return Err(invalid());
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1000 + millis))
            .map(Timestamp)
            .ok_or_else(invalid)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_field(field: &str) -> Result<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidTimestamp(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| EngineError::InvalidTimestamp(field.to_string()))
}

fn timing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+):(\d+):(\d+)\.(\d+)\s+-->\s+(\d+):(\d+):(\d+)\.(\d+)(.*)$")
            .expect("timing pattern is valid")
    })
}

/// Zero-pad every `H:M:S.f --> H:M:S.f` cue timing line
///
/// Lines without `-->`, whose timing does not match the hour-form pattern,
/// or with a field too large for a `u64`, are left untouched. Cue settings
/// after the end time are kept. Lines are re-joined with `\n`.
pub fn normalize_timestamps(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            if !line.contains("-->") {
                return line.to_string();
            }
            let Some(caps) = timing_pattern().captures(line) else {
                return line.to_string();
            };
            let fields: Option<Vec<u64>> = (1..=8).map(|i| caps[i].parse().ok()).collect();
            match fields.as_deref() {
                Some(&[h1, m1, s1, f1, h2, m2, s2, f2]) => format!(
                    "{h1:02}:{m1:02}:{s1:02}.{f1:03} --> {h2:02}:{m2:02}:{s2:02}.{f2:03}{}",
                    &caps[9]
                ),
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_form() {
        let ts: Timestamp = "01:02:03.456".parse().unwrap();
        assert_eq!(ts.as_millis(), 3_723_456);
        assert_eq!(ts.to_string(), "01:02:03.456");
    }

    #[test]
    fn test_parse_short_form() {
        let ts: Timestamp = "02:03.500".parse().unwrap();
        assert_eq!(ts.as_millis(), 123_500);
        assert_eq!(ts.to_string(), "00:02:03.500");
    }

    #[test]
    fn test_parse_unpadded() {
        let ts: Timestamp = "0:0:5.5".parse().unwrap();
        assert_eq!(ts.as_millis(), 5_005);
    }

    #[test]
    fn test_parse_long_hours() {
        let ts: Timestamp = "123:00:00.000".parse().unwrap();
        assert_eq!(ts.to_string(), "123:00:00.000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "12:34", "aa:00:00.000", "00:61:00.000", "00:00:00.1000", "1:2:3:4.000"] {
            assert!(bad.parse::<Timestamp>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_hours() {
        assert!(matches!(
            "9999999999999:00:00.000".parse::<Timestamp>(),
            Err(EngineError::InvalidTimestamp(_))
        ));
        assert!("99999999999999999999:00:00.000".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_millis_since() {
        let a = Timestamp::from_millis(1500);
        let b = Timestamp::from_millis(4000);
        assert_eq!(b.millis_since(a), 2500);
        assert_eq!(a.millis_since(b), 0);
        assert_eq!(b.as_secs_f64(), 4.0);
    }

    #[test]
    fn test_normalize_timestamps() {
        let raw = "WEBVTT\n\n1\n0:0:1.5 --> 0:0:4.25 align:start\n<v Ann>Hi</v>\n";
        let normalized = normalize_timestamps(raw);
        assert_eq!(
            normalized,
            "WEBVTT\n\n1\n00:00:01.005 --> 00:00:04.025 align:start\n<v Ann>Hi</v>"
        );
    }

    #[test]
    fn test_normalize_leaves_short_form() {
        let raw = "00:01.000 --> 00:02.000";
        assert_eq!(normalize_timestamps(raw), raw);
    }

    #[test]
    fn test_normalize_leaves_oversized_fields() {
        let raw = "99999999999999999999:0:1.0 --> 0:0:2.0";
        assert_eq!(normalize_timestamps(raw), raw);
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Timestamp::from_millis(61_500)).unwrap();
        assert_eq!(json, "\"00:01:01.500\"");
    }
}
