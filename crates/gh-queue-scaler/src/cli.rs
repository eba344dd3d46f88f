//! Command line interface

use clap::Parser;
use gh_queue_config::{ConfigError, FailurePolicy, ScalerConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gh-queue-scaler",
    about = "Count queued GitHub Actions workflow runs as an autoscaling metric",
    version
)]
pub struct Cli {
    /// Account whose repositories are inspected
    #[arg(long)]
    pub owner: Option<String>,

    /// Only inspect this repository instead of discovering all of them
    #[arg(long)]
    pub repo: Option<String>,

    /// GitHub REST API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Personal access token (defaults to GITHUB_TOKEN, then GH_TOKEN or `gh auth token`)
    #[arg(long)]
    pub token: Option<String>,

    /// Give up when the evaluation takes longer than this
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Keep counting when a single repository cannot be fetched
    #[arg(long)]
    pub skip_failed: bool,

    /// Print the full metric report as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file to use instead of .gh-queue-scaler.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the effective config: file, then environment, then flags
    pub fn load_config(&self) -> Result<ScalerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScalerConfig::load_from(path)?,
            None => ScalerConfig::load()?,
        };
        config.apply_process_env()?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the flags that were given on the command line
    pub fn apply_overrides(&self, config: &mut ScalerConfig) {
        if let Some(owner) = &self.owner {
            config.owner = owner.clone();
        }
        if let Some(repo) = &self.repo {
            config.repo = Some(repo.clone());
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = Some(secs);
        }
        if self.skip_failed {
            config.failure_policy = FailurePolicy::SkipFailed;
        }
    }
}
