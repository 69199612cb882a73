// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker configuration (§6): loaded from a TOML file, with env-var
//! overrides for the handful of settings operators tend to reach for first.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

/// `{worker_id, max_concurrency, poll_interval, lease_duration, capabilities,
/// max_attempts, inbox_poll}` (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub worker_id: String,
    pub max_concurrency: usize,
    pub poll_interval_ms: u64,
    pub lease_duration_ms: u64,
    pub capabilities: BTreeSet<String>,
    pub max_attempts: u32,
    pub inbox_poll: bool,
    pub inbox_poll_interval_ms: u64,
    pub socket_path: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_id: format!("worker-{}", nanoid::nanoid!(8)),
            max_concurrency: 4,
            poll_interval_ms: 1_000,
            lease_duration_ms: 60_000,
            capabilities: BTreeSet::new(),
            max_attempts: 3,
            inbox_poll: true,
            inbox_poll_interval_ms: 2_000,
            socket_path: "/tmp/ajrd.sock".to_string(),
        }
    }
}

impl WorkerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::from_toml_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
