//! GitHub REST client for repository discovery and workflow run listing
//!
//! This crate provides a trait-based client for the two GitHub endpoints the
//! queue-length metric needs. The trait is the seam between the remote API and
//! the counting logic, so the latter can be tested without a network.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - list_repositories()                           │
//! │  - list_workflow_runs()                          │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ test doubles        │
//! │ (direct API)    │         │ (in-memory)         │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OctocrabClient::connect("https://api.github.com", "token".to_string())?;
//! let runs = client.list_workflow_runs("octocat", "Hello-World").await?;
//! let queued = runs.workflow_runs.iter().filter(|r| r.is_queued()).count();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod octocrab_client;
pub mod token;
pub mod types;

/// Media type requested via the `Accept` header
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Header pinning the REST API version, set by octocrab on every request
pub const API_VERSION_HEADER: &str = "x-github-api-version";

/// REST API version the DTOs were written against
pub const API_VERSION: &str = "2022-11-28";

pub use client::GitHubClient;
pub use error::FetchError;
pub use octocrab_client::OctocrabClient;
pub use token::TokenResolver;
pub use types::{Account, Repository, WorkflowRun, WorkflowRunList, WorkflowRunStatus};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
