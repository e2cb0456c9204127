//! Pure selection rules for a rendered candidate list: which entry to
//! highlight for typed text, and how arrow keys move the highlight.

use crate::domain::grammar;
use crate::domain::models::{CandidateList, ClockTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Two-digit `HH:MM` form the typed text is matched against, so both `9:30`
/// and `09:30` find the same entry.
fn padded(time: &ClockTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn position_containing(list: &CandidateList, fragment: &str) -> Option<usize> {
    list.iter()
        .position(|candidate| padded(candidate).contains(fragment))
}

/// First candidate containing the typed fragment once a separator has been
/// filled in (`800` looks for `8:00`).
pub fn find_candidate(list: &CandidateList, typed: &str) -> Option<usize> {
    let typed = typed.trim();
    if typed.is_empty() {
        return None;
    }
    position_containing(list, &grammar::insert_separator(typed))
}

/// Entry highlighted when the list opens: the current value if it is listed,
/// otherwise the first entry for an empty field.
pub fn initial_selection(list: &CandidateList, current: &str) -> Option<usize> {
    let current = current.trim();
    if current.is_empty() {
        return if list.is_empty() { None } else { Some(0) };
    }
    position_containing(list, current)
}

pub fn move_selection(len: usize, current: Option<usize>, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match (current, direction) {
        (None, Direction::Next) => Some(0),
        (None, Direction::Previous) => None,
        (Some(index), Direction::Previous) => Some(index.min(last).saturating_sub(1)),
        (Some(index), Direction::Next) => Some((index + 1).min(last)),
    }
}
