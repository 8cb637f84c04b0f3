use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Directory for the per-report JSON records.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Maximum reports fetched and mined in flight.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout.
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}
