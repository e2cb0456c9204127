use crate::application::settings::SettingsLayer;
use crate::infrastructure::config::{ensure_default_settings, load_default_layer};
use crate::infrastructure::error::InfraError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BootstrapResult {
    pub log_path: PathBuf,
    pub defaults: SettingsLayer,
}

pub fn bootstrap_workspace(workspace_root: &Path) -> Result<BootstrapResult, InfraError> {
    let config_dir = workspace_root.join("config");
    let logs_dir = workspace_root.join("logs");

    fs::create_dir_all(&config_dir)?;
    fs::create_dir_all(&logs_dir)?;

    ensure_default_settings(&config_dir)?;
    let defaults = load_default_layer(&config_dir)?;

    Ok(BootstrapResult {
        log_path: logs_dir.join("commands.log"),
        defaults,
    })
}
