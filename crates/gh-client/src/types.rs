//! GitHub API data transfer objects
//!
//! These types represent the subset of the GitHub REST responses that the
//! queue-length computation reads. Unknown fields are ignored and everything
//! that is not needed for filtering is optional, so that trimmed-down payloads
//! (and fixtures) still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner of a repository (user or organization)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name (e.g., "rust-lang")
    pub login: String,

    /// Numeric account ID
    #[serde(default)]
    pub id: u64,
}

/// A repository as returned by `GET /users/{owner}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID
    #[serde(default)]
    pub id: u64,

    /// Short repository name (e.g., "rust")
    pub name: String,

    /// Full name including owner (e.g., "rust-lang/rust")
    #[serde(default)]
    pub full_name: Option<String>,

    /// Whether the repository is private
    #[serde(default)]
    pub private: bool,

    /// Owning account
    #[serde(default)]
    pub owner: Option<Account>,

    /// Repository URL for opening in browser
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Response envelope of `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRunList {
    /// Total number of runs GitHub reports for the repository
    #[serde(default)]
    pub total_count: u64,

    /// The runs contained in this response
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// A GitHub Actions workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Workflow run ID
    pub id: u64,
    /// Name of the workflow
    #[serde(default)]
    pub name: Option<String>,
    /// Status of the run (GitHub may send `null`)
    #[serde(default)]
    pub status: Option<WorkflowRunStatus>,
    /// Conclusion (only set when completed)
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Branch the workflow ran on
    #[serde(default)]
    pub head_branch: Option<String>,
    /// HEAD SHA the workflow ran on
    #[serde(default)]
    pub head_sha: Option<String>,
    /// Triggering event (e.g., "push", "pull_request")
    #[serde(default)]
    pub event: Option<String>,
    /// URL to view the workflow run
    #[serde(default)]
    pub html_url: Option<String>,
    /// When the run was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the run was last updated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Repository the run belongs to
    #[serde(default)]
    pub repository: Option<Repository>,
}

impl WorkflowRun {
    /// Whether this run is waiting for a runner to pick it up.
    ///
    /// Only the exact status `queued` counts. `waiting`, `requested`,
    /// `pending` and unknown values do not.
    pub fn is_queued(&self) -> bool {
        self.status == Some(WorkflowRunStatus::Queued)
    }
}

/// Status of a workflow run
///
/// GitHub adds statuses over time, so anything not listed here decodes to
/// `Other` instead of failing the whole response. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunStatus {
    /// Workflow is queued
    Queued,
    /// Workflow is in progress
    InProgress,
    /// Workflow has completed
    Completed,
    /// Workflow is waiting (e.g., for an environment approval)
    Waiting,
    /// Workflow run was requested
    Requested,
    /// Workflow is pending (concurrency group)
    Pending,
    /// Any status this client does not know about
    #[serde(other)]
    Other,
}
