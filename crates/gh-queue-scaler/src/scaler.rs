//! Workflow queue length entry point
//!
//! Ties the resolver and the aggregator together under the configured
//! deadline and turns the count into the metric an autoscaler consumes.

use crate::aggregator::QueueLengthAggregator;
use crate::resolver::RepositoryResolver;
use gh_client::{FetchError, GitHubClient};
use gh_queue_config::ScalerConfig;
use log::info;
use serde::Serialize;

/// Queue length metric as reported to an autoscaler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricReport {
    /// Account the metric was computed for
    pub owner: String,
    /// Number of queued workflow runs
    pub queue_length: u64,
    /// Queue length one runner is expected to absorb
    pub target_queue_length: u64,
    /// Threshold for `active`
    pub activation_queue_length: u64,
    /// Whether the queue is above the activation threshold
    pub active: bool,
}

impl MetricReport {
    pub fn new(config: &ScalerConfig, queue_length: u64) -> Self {
        Self {
            owner: config.owner.clone(),
            queue_length,
            target_queue_length: config.target_queue_length,
            activation_queue_length: config.activation_queue_length,
            active: queue_length > config.activation_queue_length,
        }
    }
}

/// Computes the number of queued workflow runs for a configured owner
///
/// Holds one client for its whole lifetime, so repeated evaluations reuse the
/// same connection pool. Nothing else is kept between evaluations.
pub struct QueueLengthScaler<C: GitHubClient> {
    client: C,
    config: ScalerConfig,
}

impl<C: GitHubClient> QueueLengthScaler<C> {
    /// Create a scaler from a validated config
    pub fn new(client: C, config: ScalerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Number of queued workflow runs right now
    ///
    /// Resolves the repositories, then fetches and counts their runs. With a
    /// configured deadline the whole pass is abandoned once it elapses and
    /// `FetchError::DeadlineExceeded` is returned. Dropping the returned
    /// future cancels the request in flight.
    pub async fn workflow_queue_length(&self) -> Result<u64, FetchError> {
        match self.config.request_timeout() {
            Some(deadline) => tokio::time::timeout(deadline, self.evaluate())
                .await
                .map_err(|_| FetchError::DeadlineExceeded(deadline))?,
            None => self.evaluate().await,
        }
    }

    /// Queue length together with the configured thresholds
    pub async fn metric_report(&self) -> Result<MetricReport, FetchError> {
        let queue_length = self.workflow_queue_length().await?;
        Ok(MetricReport::new(&self.config, queue_length))
    }

    async fn evaluate(&self) -> Result<u64, FetchError> {
        let owner = self.config.owner.as_str();

        let repos = RepositoryResolver::new(&self.client, owner)
            .resolve(self.config.repo.as_deref())
            .await?;

        let total = QueueLengthAggregator::new(&self.client, owner, self.config.failure_policy)
            .aggregate(&repos)
            .await?;

        info!(
            "{} queued workflow runs across {} repositories of {}",
            total,
            repos.len(),
            owner
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MockClient};
    use std::time::Duration;

    fn config(owner: &str, repo: Option<&str>) -> ScalerConfig {
        ScalerConfig {
            owner: owner.to_string(),
            repo: repo.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_discovered_repositories_scenario() {
        let mock = MockClient::new()
            .with_repositories(&["alpha", "beta"])
            .with_runs("alpha", &["queued", "completed", "queued"])
            .with_runs("beta", &["in_progress"]);
        let scaler = QueueLengthScaler::new(mock.clone(), config("octocat", None));

        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 2);
        assert_eq!(
            mock.calls(),
            vec![
                Call::ListRepositories("octocat".to_string()),
                Call::ListWorkflowRuns("octocat".to_string(), "alpha".to_string()),
                Call::ListWorkflowRuns("octocat".to_string(), "beta".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_not_found_scenario() {
        let mock = MockClient::new().with_listing_status(404);
        let scaler = QueueLengthScaler::new(mock.clone(), config("ghost", None));

        let err = scaler.workflow_queue_length().await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_override_without_queued_runs_scenario() {
        let mock = MockClient::new()
            .with_repositories(&["alpha"])
            .with_runs("gamma", &["completed", "in_progress"]);
        let scaler = QueueLengthScaler::new(mock.clone(), config("octocat", Some("gamma")));

        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 0);
        assert_eq!(mock.listing_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_account_makes_no_run_requests() {
        let mock = MockClient::new();
        let scaler = QueueLengthScaler::new(mock.clone(), config("octocat", None));

        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 0);
        assert_eq!(mock.calls(), vec![Call::ListRepositories("octocat".to_string())]);
    }

    #[tokio::test]
    async fn test_repeated_evaluations_refetch() {
        let mock = MockClient::new().with_runs("gamma", &["queued"]);
        let scaler = QueueLengthScaler::new(mock.clone(), config("octocat", Some("gamma")));

        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 1);
        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 1);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_evaluation() {
        let mock = MockClient::new()
            .with_repositories(&["alpha", "beta", "gamma"])
            .with_runs("alpha", &["queued"])
            .with_runs("beta", &["queued"])
            .with_runs("gamma", &["queued"])
            .with_delay(Duration::from_secs(10));
        let scaler = QueueLengthScaler::new(
            mock.clone(),
            ScalerConfig {
                request_timeout_secs: Some(25),
                ..config("octocat", None)
            },
        );

        let err = scaler.workflow_queue_length().await.unwrap_err();

        assert!(matches!(err, FetchError::DeadlineExceeded(d) if d == Duration::from_secs(25)));
        assert!(err.is_transport());
        // listing + alpha finish, beta is cut off mid-flight, gamma never starts
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_not_hit() {
        let mock = MockClient::new()
            .with_runs("gamma", &["queued", "queued"])
            .with_delay(Duration::from_secs(1));
        let scaler = QueueLengthScaler::new(
            mock,
            ScalerConfig {
                request_timeout_secs: Some(5),
                ..config("octocat", Some("gamma"))
            },
        );

        assert_eq!(scaler.workflow_queue_length().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_metric_report() {
        let mock = MockClient::new().with_runs("gamma", &["queued", "queued", "queued"]);
        let scaler = QueueLengthScaler::new(
            mock,
            ScalerConfig {
                target_queue_length: 2,
                activation_queue_length: 1,
                ..config("octocat", Some("gamma"))
            },
        );

        let report = scaler.metric_report().await.unwrap();

        assert_eq!(
            report,
            MetricReport {
                owner: "octocat".to_string(),
                queue_length: 3,
                target_queue_length: 2,
                activation_queue_length: 1,
                active: true,
            }
        );
    }

    #[test]
    fn test_report_inactive_at_threshold() {
        let config = ScalerConfig {
            activation_queue_length: 2,
            ..config("octocat", None)
        };
        assert!(!MetricReport::new(&config, 2).active);
        assert!(MetricReport::new(&config, 3).active);
        assert!(!MetricReport::new(&ScalerConfig::default(), 0).active);
    }
}
