use crate::domain::models::ClockTime;
use chrono::{Duration, Timelike};
use std::cmp::Ordering;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Result of moving a time by a number of seconds within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Within(ClockTime),
    PastEndOfDay,
    BeforeStartOfDay,
}

impl StepOutcome {
    pub fn within(self) -> Option<ClockTime> {
        match self {
            Self::Within(time) => Some(time),
            Self::PastEndOfDay | Self::BeforeStartOfDay => None,
        }
    }
}

pub fn to_offset_seconds(time: ClockTime) -> u32 {
    time.as_naive().num_seconds_from_midnight()
}

/// Inverse of [`to_offset_seconds`]. `None` for offsets outside the day.
pub fn from_offset_seconds(offset: u32) -> Option<ClockTime> {
    if offset >= SECONDS_PER_DAY {
        return None;
    }
    ClockTime::from_hms(offset / 3600, offset % 3600 / 60, offset % 60)
}

/// Adds `seconds` (possibly negative) without wrapping around midnight.
pub fn add_seconds(time: ClockTime, seconds: i64) -> StepOutcome {
    let Some(delta) = Duration::try_seconds(seconds) else {
        return if seconds < 0 {
            StepOutcome::BeforeStartOfDay
        } else {
            StepOutcome::PastEndOfDay
        };
    };

    let (next, wrapped) = time.as_naive().overflowing_add_signed(delta);
    match wrapped.cmp(&0) {
        Ordering::Equal => StepOutcome::Within(ClockTime::from_naive(next)),
        Ordering::Greater => StepOutcome::PastEndOfDay,
        Ordering::Less => StepOutcome::BeforeStartOfDay,
    }
}
