//! Textual time grammar: validation and reshaping of loosely typed time text.
//!
//! Nothing here checks ranges beyond what the patterns encode; reshaping is
//! purely textual so a half-typed value can still be matched against the
//! candidate list.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static VALID_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$").expect("valid time pattern")
});

static SEPARATED_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(2[0-3]|[01]?[0-9]):?([0-9]{0,2}):?[0-9]{0,2}$").expect("valid separator pattern")
});

static HOUR_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{0,2}):([0-9]{0,2})").expect("valid padding pattern"));

/// Empty text means "unset" and is valid. Anything else must read `H:MM`,
/// `HH:MM` or either followed by `:SS`.
pub fn is_valid(text: &str) -> bool {
    text.is_empty() || VALID_TIME.is_match(text)
}

/// Reshapes digit runs such as `2300` or `330` into `H:MM` form and drops a
/// trailing seconds group. Text that does not look like a time is returned
/// untouched.
pub fn insert_separator(text: &str) -> String {
    SEPARATED_TIME.replace(text, "${1}:${2}").into_owned()
}

/// Left-pads the hour and right-pads the minute of the first `H:M` group.
pub fn pad_zeroes(text: &str) -> String {
    HOUR_MINUTE
        .replacen(text, 1, |caps: &Captures| {
            format!("{:0>2}:{:0<2}", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Separator insertion followed by zero padding. Blank input stays blank.
///
/// Text that already carries a `:` is not re-separated, and text of five or
/// more characters is not padded: `25:00` stays `25:00`.
pub fn normalize(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    let separated = if text.contains(':') {
        text.to_string()
    } else {
        insert_separator(text)
    };
    if separated.chars().count() < 5 {
        pad_zeroes(&separated)
    } else {
        separated
    }
}
