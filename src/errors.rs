use std::path::PathBuf;
use thiserror::Error;

use crate::domain::LimitError;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config format in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error("Environment override failed: {0}")]
    Environment(#[from] config::ConfigError),

    #[error(transparent)]
    InvalidLimit(#[from] LimitError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
