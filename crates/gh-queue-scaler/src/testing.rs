//! In-memory `GitHubClient` used by the unit tests

use async_trait::async_trait;
use gh_client::{FetchError, GitHubClient, Repository, WorkflowRun, WorkflowRunList};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListRepositories(String),
    ListWorkflowRuns(String, String),
}

/// Canned answer for one endpoint: run statuses, or an HTTP error status
type Canned = Result<Vec<&'static str>, u16>;

#[derive(Clone)]
pub struct MockClient {
    repositories: Canned,
    runs: HashMap<String, Canned>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            repositories: Ok(vec![]),
            runs: HashMap::new(),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Repository names returned by the listing endpoint
    pub fn with_repositories(mut self, names: &[&'static str]) -> Self {
        self.repositories = Ok(names.to_vec());
        self
    }

    /// Make the listing endpoint answer with an HTTP error
    pub fn with_listing_status(mut self, status: u16) -> Self {
        self.repositories = Err(status);
        self
    }

    /// Statuses of the runs returned for `repo`
    pub fn with_runs(mut self, repo: &str, statuses: &[&'static str]) -> Self {
        self.runs.insert(repo.to_string(), Ok(statuses.to_vec()));
        self
    }

    /// Make the runs endpoint of `repo` answer with an HTTP error
    pub fn with_runs_status(mut self, repo: &str, status: u16) -> Self {
        self.runs.insert(repo.to_string(), Err(status));
        self
    }

    /// Delay every response (use with a paused tokio clock)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn listing_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::ListRepositories(_)))
            .count()
    }

    async fn respond(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn http_error(url: String, status: u16) -> FetchError {
    FetchError::HttpStatus {
        url,
        status,
        body: r#"{"message":"Not Found"}"#.to_string(),
    }
}

fn run(id: usize, status: &str) -> WorkflowRun {
    serde_json::from_value(json!({ "id": id, "status": status })).unwrap()
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>, FetchError> {
        self.respond(Call::ListRepositories(owner.to_string())).await;

        match &self.repositories {
            Ok(names) => Ok(names
                .iter()
                .map(|name| serde_json::from_value(json!({ "name": name })).unwrap())
                .collect()),
            Err(status) => Err(http_error(format!("mock://users/{}/repos", owner), *status)),
        }
    }

    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<WorkflowRunList, FetchError> {
        self.respond(Call::ListWorkflowRuns(owner.to_string(), repo.to_string()))
            .await;

        let url = format!("mock://repos/{}/{}/actions/runs", owner, repo);
        match self.runs.get(repo) {
            Some(Ok(statuses)) => Ok(WorkflowRunList {
                total_count: statuses.len() as u64,
                workflow_runs: statuses
                    .iter()
                    .enumerate()
                    .map(|(id, status)| run(id, status))
                    .collect(),
            }),
            Some(Err(status)) => Err(http_error(url, *status)),
            None => Err(http_error(url, 404)),
        }
    }
}
