//! Queue length aggregation
//!
//! Fetches the workflow runs of each repository, counts the queued ones and
//! sums the counts. Repositories are fetched one after another; the total does
//! not depend on the order.

use gh_client::{FetchError, GitHubClient, WorkflowRunList};
use gh_queue_config::FailurePolicy;
use log::{debug, warn};

/// Number of runs in `runs` that are waiting for a runner
pub fn count_queued(runs: &WorkflowRunList) -> u64 {
    runs.workflow_runs.iter().filter(|run| run.is_queued()).count() as u64
}

/// Sums queued workflow runs across repositories
pub struct QueueLengthAggregator<'a, C: GitHubClient + ?Sized> {
    client: &'a C,
    owner: &'a str,
    policy: FailurePolicy,
}

impl<'a, C: GitHubClient + ?Sized> QueueLengthAggregator<'a, C> {
    pub fn new(client: &'a C, owner: &'a str, policy: FailurePolicy) -> Self {
        Self {
            client,
            owner,
            policy,
        }
    }

    /// Total number of queued runs across `repos`
    ///
    /// An empty slice yields zero without any request. Every call fetches
    /// all repositories again.
    pub async fn aggregate(&self, repos: &[String]) -> Result<u64, FetchError> {
        let mut tally = FailureTally::new(self.policy);
        let mut total = 0u64;

        for repo in repos {
            match self.client.list_workflow_runs(self.owner, repo).await {
                Ok(runs) => {
                    let queued = count_queued(&runs);
                    debug!(
                        "{}/{}: {} queued of {} runs",
                        self.owner,
                        repo,
                        queued,
                        runs.workflow_runs.len()
                    );
                    total += queued;
                    tally.success();
                }
                Err(err) => tally.failure(self.owner, repo, err)?,
            }
        }

        tally.finish(total)
    }
}

/// Applies a `FailurePolicy` to the outcomes of one aggregation pass
///
/// Every policy decision lives here: whether a failure aborts the pass, and
/// whether the pass as a whole succeeded.
#[derive(Debug)]
struct FailureTally {
    policy: FailurePolicy,
    answered: usize,
    last_skipped: Option<FetchError>,
}

impl FailureTally {
    fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            answered: 0,
            last_skipped: None,
        }
    }

    fn success(&mut self) {
        self.answered += 1;
    }

    /// Returns the error when the policy aborts on it
    fn failure(&mut self, owner: &str, repo: &str, err: FetchError) -> Result<(), FetchError> {
        match self.policy {
            FailurePolicy::FailFast => Err(err),
            FailurePolicy::SkipFailed => {
                warn!("Skipping {}/{}: {}", owner, repo, err);
                self.last_skipped = Some(err);
                Ok(())
            }
        }
    }

    /// Final verdict for the pass
    ///
    /// Skipping only holds while at least one repository answered, so an
    /// outage never reads as an empty queue.
    fn finish(self, total: u64) -> Result<u64, FetchError> {
        match (self.policy, self.last_skipped) {
            (FailurePolicy::SkipFailed, Some(err)) if self.answered == 0 => Err(err),
            _ => Ok(total),
        }
    }
}
