//! Repository resolution
//!
//! Decides which repositories are inspected: the configured override, or
//! every repository of the owner.

use gh_client::{FetchError, GitHubClient};
use log::debug;

/// Resolves the repositories a queue-length evaluation looks at
pub struct RepositoryResolver<'a, C: GitHubClient + ?Sized> {
    client: &'a C,
    owner: &'a str,
}

impl<'a, C: GitHubClient + ?Sized> RepositoryResolver<'a, C> {
    pub fn new(client: &'a C, owner: &'a str) -> Self {
        Self { client, owner }
    }

    /// Return the repository names to inspect
    ///
    /// With an override the result is exactly that one name and GitHub is
    /// not contacted. Without one, the owner's repositories are listed and
    /// returned in the order GitHub sent them. Listing failures are returned
    /// as-is, without retry.
    pub async fn resolve(&self, repo_override: Option<&str>) -> Result<Vec<String>, FetchError> {
        if let Some(repo) = repo_override {
            debug!("Using repository override {}/{}", self.owner, repo);
            return Ok(vec![repo.to_string()]);
        }

        let repos: Vec<String> = self
            .client
            .list_repositories(self.owner)
            .await?
            .into_iter()
            .map(|repo| repo.name)
            .collect();

        debug!("Discovered {} repositories for {}", repos.len(), self.owner);
        Ok(repos)
    }
}
