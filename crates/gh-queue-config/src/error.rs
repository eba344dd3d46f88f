//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating the scaler config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No owner configured. Set `owner` in the config file, GITHUB_OWNER, or --owner")]
    MissingOwner,

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
