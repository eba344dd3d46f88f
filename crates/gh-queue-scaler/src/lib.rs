//! Queued GitHub Actions workflow runs as an autoscaling metric
//!
//! The metric is the number of workflow runs with status `queued` across the
//! repositories of one account (or a single configured repository).
//!
//! ```text
//! ScalerConfig ──► RepositoryResolver ──► QueueLengthAggregator ──► u64
//!                        │                        │
//!                        └──────── GitHubClient ──┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::OctocrabClient;
//! use gh_queue_config::ScalerConfig;
//! use gh_queue_scaler::QueueLengthScaler;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ScalerConfig {
//!     owner: "octocat".to_string(),
//!     ..Default::default()
//! };
//! let client = OctocrabClient::connect(&config.api_url, "token".to_string())?;
//! let scaler = QueueLengthScaler::new(client, config);
//! println!("{}", scaler.workflow_queue_length().await?);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cli;
pub mod logger;
pub mod resolver;
pub mod scaler;

#[cfg(test)]
mod testing;

pub use aggregator::{count_queued, QueueLengthAggregator};
pub use resolver::RepositoryResolver;
pub use scaler::{MetricReport, QueueLengthScaler};
