//! Core of a fallback time-entry control: loose time text is normalized,
//! validated and snapped to an evenly stepped list of candidate times.
//!
//! The presentation layer (rendering the list, focus and key handling) lives
//! elsewhere and talks to this crate either directly or through the JSON line
//! protocol served by [`run`].

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::commands::{ConfigSources, TimeInputState};
pub use application::settings::{SettingsLayer, StepSetting, resolve};
pub use domain::grammar::{insert_separator, is_valid, normalize, pad_zeroes};
pub use domain::models::{CandidateList, ClockTime, ConfigError, RangeConfig, SettingField};
pub use domain::range_list::generate;
pub use domain::selection::Direction;
pub use domain::snapper::{CommitOutcome, commit, snap, snap_text};
pub use infrastructure::error::InfraError;

use application::commands::{
    candidates_impl, commit_impl, find_candidate_impl, initial_selection_impl,
    move_selection_impl, normalize_impl, resolve_config_impl, snap_impl, validate_impl,
};
use serde::Deserialize;
use std::io::{self, BufRead, Write};

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum Request {
    Ping,
    ResolveConfig {
        #[serde(default)]
        config: ConfigSources,
    },
    Candidates {
        #[serde(default)]
        config: ConfigSources,
    },
    Normalize {
        text: String,
    },
    Validate {
        text: String,
    },
    Snap {
        text: String,
        #[serde(default)]
        config: ConfigSources,
    },
    Commit {
        text: String,
        #[serde(default)]
        config: ConfigSources,
    },
    FindCandidate {
        text: String,
        #[serde(default)]
        config: ConfigSources,
    },
    InitialSelection {
        #[serde(default)]
        text: String,
        #[serde(default)]
        config: ConfigSources,
    },
    MoveSelection {
        len: usize,
        #[serde(default)]
        current: Option<usize>,
        direction: Direction,
    },
}

fn resolve_config(state: &TimeInputState, sources: &ConfigSources) -> Result<RangeConfig, String> {
    resolve_config_impl(state, sources)
        .map_err(|error| state.command_error("resolve_config", &error))
}

fn candidates(state: &TimeInputState, sources: &ConfigSources) -> Result<Vec<String>, String> {
    let config = resolve_config(state, sources)?;
    let list = candidates_impl(state, &config)
        .map_err(|error| state.command_error("candidates", &error))?;
    Ok(list.display_strings())
}

fn snap_command(
    state: &TimeInputState,
    text: &str,
    sources: &ConfigSources,
) -> Result<String, String> {
    let config = resolve_config(state, sources)?;
    Ok(snap_impl(text, &config))
}

fn commit_command(
    state: &TimeInputState,
    text: &str,
    sources: &ConfigSources,
) -> Result<CommitOutcome, String> {
    let config = resolve_config(state, sources)?;
    Ok(commit_impl(text, &config))
}

fn find_candidate(
    state: &TimeInputState,
    text: &str,
    sources: &ConfigSources,
) -> Result<Option<usize>, String> {
    let config = resolve_config(state, sources)?;
    find_candidate_impl(state, &config, text)
        .map_err(|error| state.command_error("find_candidate", &error))
}

fn initial_selection(
    state: &TimeInputState,
    text: &str,
    sources: &ConfigSources,
) -> Result<Option<usize>, String> {
    let config = resolve_config(state, sources)?;
    initial_selection_impl(state, &config, text)
        .map_err(|error| state.command_error("initial_selection", &error))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|error| error.to_string())
}

fn dispatch(state: &TimeInputState, request: Request) -> Result<serde_json::Value, String> {
    match request {
        Request::Ping => to_json("pong"),
        Request::ResolveConfig { config } => to_json(resolve_config(state, &config)?),
        Request::Candidates { config } => to_json(candidates(state, &config)?),
        Request::Normalize { text } => to_json(normalize_impl(&text)),
        Request::Validate { text } => to_json(validate_impl(&text)),
        Request::Snap { text, config } => to_json(snap_command(state, &text, &config)?),
        Request::Commit { text, config } => to_json(commit_command(state, &text, &config)?),
        Request::FindCandidate { text, config } => {
            to_json(find_candidate(state, &text, &config)?)
        }
        Request::InitialSelection { text, config } => {
            to_json(initial_selection(state, &text, &config)?)
        }
        Request::MoveSelection {
            len,
            current,
            direction,
        } => to_json(move_selection_impl(len, current, direction)),
    }
}

/// Answers one request line with one response object:
/// `{"ok": ...}` on success, `{"error": "..."}` otherwise.
pub fn handle_line(state: &TimeInputState, line: &str) -> serde_json::Value {
    let result = serde_json::from_str::<Request>(line)
        .map_err(|error| {
            let message = format!("malformed request: {error}");
            state.log().error("request", &message);
            message
        })
        .and_then(|request| dispatch(state, request));

    match result {
        Ok(value) => serde_json::json!({ "ok": value }),
        Err(message) => serde_json::json!({ "error": message }),
    }
}

/// Serves the JSON line protocol on stdin/stdout for the current directory's
/// workspace until stdin closes.
pub fn run() -> Result<(), InfraError> {
    let workspace_root = std::env::current_dir()?;
    let state = TimeInputState::new(workspace_root)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&state, &line);
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    Ok(())
}
