use crate::domain::models::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Invalid settings file: {0}")]
    InvalidSettingsFile(String),
    #[error("Candidate cache unavailable: {0}")]
    Cache(String),
}
