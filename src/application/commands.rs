use crate::application::bootstrap::bootstrap_workspace;
use crate::application::settings::{SettingsLayer, resolve};
use crate::domain::grammar;
use crate::domain::models::{CandidateList, RangeConfig};
use crate::domain::range_list::generate;
use crate::domain::selection::{self, Direction};
use crate::domain::snapper::{self, CommitOutcome};
use crate::infrastructure::candidate_cache::{CandidateCacheRepository, InMemoryCandidateCache};
use crate::infrastructure::command_log::CommandLog;
use crate::infrastructure::error::InfraError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state behind the command surface. Each resolved configuration is
/// independent; the only shared piece is the candidate cache.
pub struct TimeInputState {
    defaults: SettingsLayer,
    candidate_cache: Arc<InMemoryCandidateCache>,
    log: CommandLog,
}

impl TimeInputState {
    pub fn new(workspace_root: PathBuf) -> Result<Self, InfraError> {
        let bootstrap = bootstrap_workspace(&workspace_root)?;
        Ok(Self {
            defaults: bootstrap.defaults,
            candidate_cache: Arc::new(InMemoryCandidateCache::default()),
            log: CommandLog::to_file(bootstrap.log_path),
        })
    }

    /// State without a workspace: nothing is read from or logged to disk.
    pub fn detached(defaults: SettingsLayer) -> Self {
        Self {
            defaults,
            candidate_cache: Arc::new(InMemoryCandidateCache::default()),
            log: CommandLog::disabled(),
        }
    }

    pub fn defaults(&self) -> &SettingsLayer {
        &self.defaults
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn command_error(&self, command: &str, error: &InfraError) -> String {
        self.log.error(command, &error.to_string());
        error.to_string()
    }
}

/// The three settings layers a caller can supply. Missing `defaults` means the
/// workspace defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSources {
    #[serde(default)]
    pub defaults: Option<SettingsLayer>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub overrides: SettingsLayer,
}

pub fn resolve_config_impl(
    state: &TimeInputState,
    sources: &ConfigSources,
) -> Result<RangeConfig, InfraError> {
    let defaults = sources.defaults.as_ref().unwrap_or(&state.defaults);
    let attributes = SettingsLayer::from_attributes(
        sources
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );
    let config = resolve(defaults, &attributes, &sources.overrides)?;
    state.log.info(
        "resolve_config",
        &format!(
            "step={} min={} max={}",
            config.step(),
            config.min(),
            config.max()
        ),
    );
    Ok(config)
}

pub fn candidates_impl(
    state: &TimeInputState,
    config: &RangeConfig,
) -> Result<Arc<CandidateList>, InfraError> {
    if let Some(list) = state.candidate_cache.get(config)? {
        return Ok(list);
    }

    let list = Arc::new(generate(config));
    state.log.info(
        "candidates",
        &format!("generated {} candidates for {}", list.len(), config.cache_key()),
    );
    state.candidate_cache.insert(config, Arc::clone(&list))?;
    Ok(list)
}

pub fn normalize_impl(raw: &str) -> String {
    grammar::normalize(raw)
}

pub fn validate_impl(text: &str) -> bool {
    grammar::is_valid(text)
}

pub fn snap_impl(text: &str, config: &RangeConfig) -> String {
    snapper::snap_text(text, config)
}

pub fn commit_impl(raw: &str, config: &RangeConfig) -> CommitOutcome {
    snapper::commit(raw, config)
}

pub fn find_candidate_impl(
    state: &TimeInputState,
    config: &RangeConfig,
    typed: &str,
) -> Result<Option<usize>, InfraError> {
    let list = candidates_impl(state, config)?;
    Ok(selection::find_candidate(&list, typed))
}

pub fn initial_selection_impl(
    state: &TimeInputState,
    config: &RangeConfig,
    current: &str,
) -> Result<Option<usize>, InfraError> {
    let list = candidates_impl(state, config)?;
    Ok(selection::initial_selection(&list, current))
}

pub fn move_selection_impl(
    len: usize,
    current: Option<usize>,
    direction: Direction,
) -> Option<usize> {
    selection::move_selection(len, current, direction)
}
