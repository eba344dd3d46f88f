//! Scaler configuration
//!
//! Configuration loaded from `.gh-queue-scaler.toml`, then overlaid with
//! environment variables and finally command line flags. Once validated the
//! config is immutable and handed to the resolver and aggregator by reference.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default GitHub REST API origin
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variables recognised by [`ScalerConfig::apply_env`]
pub mod env_keys {
    pub const API_URL: &str = "GITHUB_API_URL";
    pub const OWNER: &str = "GITHUB_OWNER";
    pub const TOKEN: &str = "GITHUB_TOKEN";
    pub const REPO: &str = "GITHUB_REPO";
    pub const TARGET_QUEUE_LENGTH: &str = "TARGET_WORKFLOW_QUEUE_LENGTH";
    pub const ACTIVATION_QUEUE_LENGTH: &str = "ACTIVATION_TARGET_WORKFLOW_QUEUE_LENGTH";
    pub const REQUEST_TIMEOUT_SECS: &str = "GITHUB_REQUEST_TIMEOUT_SECS";
}

/// What to do when fetching one repository's runs fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole computation on the first failure
    #[default]
    FailFast,
    /// Log the failed repository and keep counting the others
    SkipFailed,
}

/// Configuration of a queue-length evaluation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScalerConfig {
    /// GitHub REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Account whose repositories are inspected
    #[serde(default)]
    pub owner: String,

    /// Personal access token (resolved from the environment when absent)
    #[serde(default)]
    pub token: Option<String>,

    /// Single repository to inspect instead of discovering all of them
    #[serde(default)]
    pub repo: Option<String>,

    /// Queue length one runner is expected to absorb
    #[serde(default = "default_target_queue_length")]
    pub target_queue_length: u64,

    /// Queue length above which the metric reports activity
    #[serde(default)]
    pub activation_queue_length: u64,

    /// Deadline for a complete evaluation, in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Per-repository failure handling
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_target_queue_length() -> u64 {
    1
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: String::new(),
            token: None,
            repo: None,
            target_queue_length: default_target_queue_length(),
            activation_queue_length: 0,
            request_timeout_secs: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ScalerConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Result<Self, ConfigError> {
        match crate::load_config_file() {
            Some((path, content)) => {
                let config = Self::parse(&path, &content)?;
                log::info!("Loaded scaler config from {}", path.display());
                Ok(config)
            }
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(path, &content)?;
        log::info!("Loaded scaler config from {}", path.display());
        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay values from the process environment
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment lookup
    ///
    /// Empty variables are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(env_keys::API_URL) {
            self.api_url = url;
        }
        if let Some(owner) = get(env_keys::OWNER) {
            self.owner = owner;
        }
        if let Some(token) = get(env_keys::TOKEN) {
            self.token = Some(token);
        }
        if let Some(repo) = get(env_keys::REPO) {
            self.repo = Some(repo);
        }
        if let Some(raw) = get(env_keys::TARGET_QUEUE_LENGTH) {
            self.target_queue_length = parse_number(env_keys::TARGET_QUEUE_LENGTH, &raw)?;
        }
        if let Some(raw) = get(env_keys::ACTIVATION_QUEUE_LENGTH) {
            self.activation_queue_length =
                parse_number(env_keys::ACTIVATION_QUEUE_LENGTH, &raw)?;
        }
        if let Some(raw) = get(env_keys::REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs =
                Some(parse_number(env_keys::REQUEST_TIMEOUT_SECS, &raw)?);
        }

        Ok(())
    }

    /// Check that the config describes something that can be evaluated
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::MissingOwner);
        }
        if matches!(self.repo.as_deref(), Some(r) if r.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "repo",
                reason: "repository override must not be empty".to_string(),
            });
        }
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "api_url",
                reason: format!("'{}' is not an absolute http(s) URL", self.api_url),
            });
        }
        if self.target_queue_length == 0 {
            return Err(ConfigError::Invalid {
                field: "target_queue_length",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Deadline for a complete evaluation, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        field: key,
        reason: format!("'{}' is not a non-negative integer", raw),
    })
}
