//! GitHub client trait
//!
//! This module defines the `GitHubClient` trait that the queue-length
//! computation is written against. The octocrab implementation talks to the
//! real API; tests substitute an in-memory one.

use crate::error::FetchError;
use crate::types::{Repository, WorkflowRunList};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Every call is a single authenticated GET. Implementations must not retry
/// and must not cache: each call reflects the remote state at that moment.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one client (and its connection
/// pool) can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::GitHubClient;
///
/// async fn names(client: &dyn GitHubClient) -> Result<Vec<String>, gh_client::FetchError> {
///     let repos = client.list_repositories("octocat").await?;
///     Ok(repos.into_iter().map(|r| r.name).collect())
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// List the repositories owned by an account
    ///
    /// # Arguments
    ///
    /// * `owner` - User account whose repositories are listed
    ///
    /// # Returns
    ///
    /// Repositories in the order GitHub returned them.
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>, FetchError>;

    /// List the workflow runs of a repository
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    ///
    /// # Returns
    ///
    /// The workflow run collection as returned by GitHub.
    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<WorkflowRunList, FetchError>;
}
