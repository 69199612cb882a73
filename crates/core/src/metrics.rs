// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime health type shared between engine, worker, and wire crates.

use serde::{Deserialize, Serialize};

/// Health snapshot exposed via the worker's status query, combining the last
/// reclamation sweep with a rough view of in-flight work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeHealth {
    pub last_reclaim_ms: u64,
    pub jobs_running: usize,
    pub jobs_waiting: usize,
    pub leases_reclaimed: u64,
    pub last_error: Option<String>,
}
