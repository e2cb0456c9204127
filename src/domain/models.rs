use crate::domain::grammar;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest allowed step between two candidates: twelve hours.
pub const MAX_STEP_SECONDS: u32 = 60 * 60 * 12;

/// A time of day without date or timezone.
///
/// Renders as `H:MM` (hours below ten have no leading zero). Seconds are kept
/// for arithmetic but never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Parses text accepted by [`grammar::is_valid`]. Empty text is "unset" and
    /// therefore not a time.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || !grammar::is_valid(text) {
            return None;
        }
        let mut parts = text.split(':');
        let hour = parts.next()?.parse::<u32>().ok()?;
        let minute = parts.next()?.parse::<u32>().ok()?;
        let second = match parts.next() {
            Some(value) => value.parse::<u32>().ok()?,
            None => 0,
        };
        Self::from_hms(hour, minute, second)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub(crate) fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub(crate) fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("{value:?} is not a valid time string (13:45)"))
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    Step,
    Min,
    Max,
}

impl SettingField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A settings combination that cannot drive a time input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("step has to be a number between 1 and 43200, got {value:?}")]
    StepNotNumeric { value: String },
    #[error("step has to be a number between 1 and 43200, got {step}")]
    StepOutOfRange { step: i64 },
    #[error("{field} has to be a valid time string (13:45), got {value:?}")]
    InvalidTime { field: SettingField, value: String },
    #[error("min ({min}) must not be after max ({max})")]
    MinAfterMax { min: ClockTime, max: ClockTime },
}

impl ConfigError {
    pub fn field(&self) -> SettingField {
        match self {
            Self::StepNotNumeric { .. } | Self::StepOutOfRange { .. } => SettingField::Step,
            Self::InvalidTime { field, .. } => *field,
            Self::MinAfterMax { .. } => SettingField::Min,
        }
    }
}

/// Validated step/min/max policy of one time input. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RangeConfig {
    step: u32,
    min: ClockTime,
    max: ClockTime,
}

impl RangeConfig {
    pub fn new(step: i64, min: ClockTime, max: ClockTime) -> Result<Self, ConfigError> {
        if step <= 0 || step > i64::from(MAX_STEP_SECONDS) {
            return Err(ConfigError::StepOutOfRange { step });
        }
        if min > max {
            return Err(ConfigError::MinAfterMax { min, max });
        }
        Ok(Self {
            step: step as u32,
            min,
            max,
        })
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn min(&self) -> ClockTime {
        self.min
    }

    pub fn max(&self) -> ClockTime {
        self.max
    }

    /// The latest step boundary (counted from `min`) that does not exceed `max`.
    pub fn last_boundary(&self) -> ClockTime {
        let min = self.min.as_naive().num_seconds_from_midnight();
        let max = self.max.as_naive().num_seconds_from_midnight();
        let span = max - min;
        let offset = min + span - span % self.step;
        NaiveTime::from_num_seconds_from_midnight_opt(offset, 0)
            .map(ClockTime::from_naive)
            .unwrap_or(self.max)
    }

    /// Identity used to share candidate lists between equal configurations.
    pub fn cache_key(&self) -> String {
        format!(
            "step{}-min{}-max{}",
            self.step,
            self.min.as_naive().num_seconds_from_midnight(),
            self.max.as_naive().num_seconds_from_midnight()
        )
    }
}

/// Ordered, strictly increasing selectable times for one [`RangeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateList(Vec<ClockTime>);

impl CandidateList {
    pub(crate) fn from_times(times: Vec<ClockTime>) -> Self {
        Self(times)
    }

    pub fn as_slice(&self) -> &[ClockTime] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClockTime> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<ClockTime> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<ClockTime> {
        self.0.last().copied()
    }

    pub fn display_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a ClockTime;
    type IntoIter = std::slice::Iter<'a, ClockTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
