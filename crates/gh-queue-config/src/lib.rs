//! Configuration for gh-queue-scaler
//!
//! This crate provides:
//! - Configuration file discovery (TOML)
//! - The scaler configuration (ScalerConfig) with environment overlay
//! - Validation errors (ConfigError)

pub mod config_file;
pub mod error;
pub mod scaler_config;

pub use config_file::{load_config_file, CONFIG_FILE};
pub use error::ConfigError;
pub use scaler_config::{env_keys, FailurePolicy, ScalerConfig, DEFAULT_API_URL};
