//! GitHub token resolution
//!
//! Used when no token was configured explicitly. `GITHUB_TOKEN` is part of
//! the scaler configuration, so by the time this runs it was already absent.

use anyhow::{Context, Result};
use log::debug;

/// Environment variable shared with the gh CLI
const GH_TOKEN: &str = "GH_TOKEN";

/// Resolves a GitHub token from the environment
///
/// Tries multiple sources in order:
/// 1. `GH_TOKEN`
/// 2. `gh auth token` command
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Token found in the environment at construction time
    env_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver reading the process environment
    pub fn new() -> Self {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Create a resolver reading variables through `lookup`
    pub fn from_env<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let env_token = lookup(GH_TOKEN).filter(|t| !t.trim().is_empty());
        Self { env_token }
    }

    /// Create a resolver with a fixed environment token (or none)
    pub fn with_env_token(env_token: Option<String>) -> Self {
        Self { env_token }
    }

    /// Get a token, falling back to the gh CLI
    pub async fn get_token(&self) -> Result<String> {
        if let Some(ref token) = self.env_token {
            debug!("Using token from {}", GH_TOKEN);
            return Ok(token.clone());
        }

        debug!("Trying gh auth token");
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token"])
            .output()
            .await
            .context("Failed to run 'gh auth token'")?;

        if output.status.success() {
            let token = String::from_utf8(output.stdout)
                .context("Invalid UTF-8 in gh auth token output")?
                .trim()
                .to_string();
            if !token.is_empty() {
                debug!("Using token from gh CLI");
                return Ok(token);
            }
        }

        Err(anyhow::anyhow!(
            "No GitHub token found. Set GITHUB_TOKEN or GH_TOKEN, configure `token`, or run 'gh auth login'"
        ))
    }
}
