use crate::domain::arithmetic::{add_seconds, to_offset_seconds};
use crate::domain::grammar;
use crate::domain::models::{ClockTime, RangeConfig};
use serde::Serialize;

/// Rounds `time` to the nearest step boundary counted from `min`, keeping the
/// result inside the configured range. Exactly half a step rounds up.
pub fn snap(time: ClockTime, config: &RangeConfig) -> ClockTime {
    if time < config.min() {
        return config.min();
    }
    let ceiling = config.last_boundary();
    if time > ceiling {
        return ceiling;
    }

    let step = i64::from(config.step());
    let from_min = i64::from(to_offset_seconds(time)) - i64::from(to_offset_seconds(config.min()));
    let residual = from_min % step;
    if residual == 0 {
        return time;
    }

    // 2 * residual >= step keeps the half-step comparison exact in whole seconds.
    if 2 * residual >= step {
        if let Some(up) = add_seconds(time, step - residual).within() {
            return up;
        }
    }
    add_seconds(time, -residual).within().unwrap_or(config.min())
}

/// Normalizes and validates raw text, then snaps it. Invalid text yields `""`.
pub fn snap_text(raw: &str, config: &RangeConfig) -> String {
    let normalized = grammar::normalize(raw);
    if normalized.is_empty() {
        return normalized;
    }
    match ClockTime::parse(&normalized) {
        Some(time) => snap(time, config).to_string(),
        None => String::new(),
    }
}

/// What a committed edit should do to the field contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum CommitOutcome {
    Unchanged,
    Corrected(String),
    Cleared,
}

/// Runs the commit-time correction for a field value.
pub fn commit(raw: &str, config: &RangeConfig) -> CommitOutcome {
    let corrected = snap_text(raw, config);
    if corrected == raw {
        CommitOutcome::Unchanged
    } else if corrected.is_empty() {
        CommitOutcome::Cleared
    } else {
        CommitOutcome::Corrected(corrected)
    }
}
