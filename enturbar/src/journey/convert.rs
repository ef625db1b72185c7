//! Conversion from planner DTOs to a departure leg.

use chrono::{DateTime, FixedOffset};

use crate::domain::{TimeError, parse_timestamp};

use super::types::Leg;

/// Error converting a DTO leg.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A timestamp could not be parsed
    #[error("{field}: {source}")]
    Time {
        field: &'static str,
        source: TimeError,
    },

    /// Leg has no line public code (e.g. a walking leg)
    #[error("leg has no line public code")]
    NoLine,
}

/// The parts of a leg the tray needs, with timestamps parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureLeg {
    /// Line public code.
    pub label: String,
    pub expected_start: DateTime<FixedOffset>,
    pub expected_end: DateTime<FixedOffset>,
    pub aimed_start: Option<DateTime<FixedOffset>>,
    pub situation_summaries: Vec<String>,
}

/// Convert a DTO leg.
pub fn convert_leg(leg: &Leg) -> Result<DepartureLeg, ConversionError> {
    let label = leg
        .line
        .as_ref()
        .and_then(|l| l.public_code.as_deref())
        .filter(|code| !code.is_empty())
        .ok_or(ConversionError::NoLine)?
        .to_string();

    let time = |field: &'static str, value: &str| {
        parse_timestamp(value).map_err(|source| ConversionError::Time { field, source })
    };

    Ok(DepartureLeg {
        label,
        expected_start: time("expectedStartTime", &leg.expected_start_time)?,
        expected_end: time("expectedEndTime", &leg.expected_end_time)?,
        aimed_start: leg
            .aimed_start_time
            .as_deref()
            .map(|t| time("aimedStartTime", t))
            .transpose()?,
        situation_summaries: leg.situation_summaries().map(str::to_string).collect(),
    })
}
