//! Departure time handling.
//!
//! The journey planner reports times as RFC 3339 timestamps carrying the
//! offset of the stop (e.g. `2024-03-15T08:00:00+01:00`). The tray shows
//! them as `HH:MM`, either in the machine's local zone or in the zone the
//! planner reported.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local};

/// Error returned when a timestamp or zone name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: String,
}

impl TimeError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Zone used when formatting departure times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The zone of the machine running the tray.
    #[default]
    Local,
    /// The offset carried by the timestamp itself.
    Source,
}

impl FromStr for DisplayZone {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(DisplayZone::Local),
            "source" => Ok(DisplayZone::Source),
            other => Err(TimeError::new(format!(
                "unknown display zone {other:?} (expected \"local\" or \"source\")"
            ))),
        }
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => f.write_str("local"),
            DisplayZone::Source => f.write_str("source"),
        }
    }
}

/// Parse an RFC 3339 timestamp from the journey planner.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimeError> {
    DateTime::parse_from_rfc3339(s).map_err(|e| TimeError::new(format!("{s:?}: {e}")))
}

/// Format a timestamp as zero-padded `HH:MM`.
///
/// # Examples
///
/// ```
/// use enturbar::domain::{DisplayZone, format_hhmm, parse_timestamp};
///
/// let t = parse_timestamp("2024-03-15T08:05:00+01:00").unwrap();
/// assert_eq!(format_hhmm(&t, DisplayZone::Source), "08:05");
/// ```
pub fn format_hhmm(t: &DateTime<FixedOffset>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Local => t.with_timezone(&Local).format("%H:%M").to_string(),
        DisplayZone::Source => t.format("%H:%M").to_string(),
    }
}

/// Whole minutes between the aimed and expected times.
///
/// Halves round towards positive infinity, so 90 seconds late is 2 minutes
/// and 30 seconds early is 0.
pub fn delay_minutes(aimed: &DateTime<FixedOffset>, expected: &DateTime<FixedOffset>) -> i64 {
    let delay_ms = (*expected - *aimed).num_milliseconds();
    (delay_ms as f64 / 60_000.0 + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn parse_with_offset() {
        let t = ts("2024-03-15T08:00:00+01:00");
        assert_eq!(t.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_timestamp("08:00").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn format_source_zone_pads() {
        assert_eq!(
            format_hhmm(&ts("2024-03-15T00:07:00+01:00"), DisplayZone::Source),
            "00:07"
        );
        assert_eq!(
            format_hhmm(&ts("2024-03-15T23:59:59+02:00"), DisplayZone::Source),
            "23:59"
        );
    }

    #[test]
    fn format_local_zone_is_hhmm() {
        let formatted = format_hhmm(&ts("2024-03-15T08:00:00+01:00"), DisplayZone::Local);
        assert_eq!(formatted.len(), 5);
        assert_eq!(&formatted[2..3], ":");
    }

    #[test]
    fn delay_rounding() {
        let aimed = ts("2024-03-15T08:00:00+01:00");
        let at = |ms: i64| aimed + Duration::milliseconds(ms);

        assert_eq!(delay_minutes(&aimed, &aimed), 0);
        assert_eq!(delay_minutes(&aimed, &at(60_000)), 1);
        assert_eq!(delay_minutes(&aimed, &at(89_999)), 1);
        assert_eq!(delay_minutes(&aimed, &at(90_000)), 2);
        assert_eq!(delay_minutes(&aimed, &at(120_000)), 2);
        assert_eq!(delay_minutes(&aimed, &at(-30_000)), 0);
        assert_eq!(delay_minutes(&aimed, &at(-120_000)), -2);
    }

    #[test]
    fn delay_across_offsets() {
        // Same instant written with different offsets
        let aimed = ts("2024-03-15T08:00:00+01:00");
        let expected = ts("2024-03-15T07:03:00+00:00");
        assert_eq!(delay_minutes(&aimed, &expected), 3);
    }

    #[test]
    fn display_zone_from_str() {
        assert_eq!("local".parse::<DisplayZone>(), Ok(DisplayZone::Local));
        assert_eq!("Source".parse::<DisplayZone>(), Ok(DisplayZone::Source));
        assert!("utc".parse::<DisplayZone>().is_err());
    }
}
