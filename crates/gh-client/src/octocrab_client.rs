//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Requests go through octocrab's raw GET so that the status code and body of
//! a failed response are kept instead of being folded into a generic error.

use crate::client::GitHubClient;
use crate::error::FetchError;
use crate::types::{Repository, WorkflowRunList};
use crate::ACCEPT_MEDIA_TYPE;
use anyhow::{Context, Result};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, ACCEPT};
use http::StatusCode;
use log::debug;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
///
/// Cloning is cheap: clones share the same octocrab instance and therefore the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    base_url: String,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    ///
    /// `base_url` is only used to render full URLs in error messages; the
    /// octocrab instance must already be configured for the same host.
    pub fn new(octocrab: Arc<Octocrab>, base_url: impl Into<String>) -> Self {
        Self {
            octocrab,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client for `api_url` authenticating with a bearer token
    pub fn connect(api_url: &str, token: String) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .add_retry_config(RetryConfig::None)
            .base_uri(api_url)
            .with_context(|| format!("Invalid GitHub API URL '{}'", api_url))?
            .build()
            .context("Failed to build Octocrab client")?;

        debug!("GitHub client created for {}", api_url);
        Ok(Self::new(Arc::new(octocrab), api_url))
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    /// Base URL the client talks to, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform an authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, route);
        debug!("GET {}", url);

        let response = self
            .octocrab
            ._get_with_headers(route, Some(request_headers()))
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let body = check_status(&url, status, body)?;
        decode(&url, &body)
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>, FetchError> {
        debug!("Fetching repositories for {}", owner);

        let route = format!("/users/{}/repos", owner);
        let repos: Vec<Repository> = self.get_json(&route).await?;

        debug!("Fetched {} repositories for {}", repos.len(), owner);
        Ok(repos)
    }

    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<WorkflowRunList, FetchError> {
        debug!("Fetching workflow runs for {}/{}", owner, repo);

        let route = format!("/repos/{}/{}/actions/runs", owner, repo);
        let runs: WorkflowRunList = self.get_json(&route).await?;

        debug!(
            "Fetched {} workflow runs for {}/{}",
            runs.workflow_runs.len(),
            owner,
            repo
        );
        Ok(runs)
    }
}

/// Headers sent with every request
///
/// Octocrab already adds the bearer authorization and the
/// `x-github-api-version` pin, so only the media type is set here.
fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
    headers
}

/// Turn a non-success response into `FetchError::HttpStatus`
fn check_status(url: &str, status: StatusCode, body: String) -> Result<String, FetchError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
