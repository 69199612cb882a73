// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response types the worker daemon sends back over the IPC socket.

use ajr_core::{Job, JobId, RuntimeHealth};
use serde::{Deserialize, Serialize};

/// Response from the worker daemon to the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Generic success, e.g. a cancel or signal that was accepted.
    Ok,

    /// Health check response.
    Pong,

    /// A newly submitted job's id.
    JobId { job_id: JobId },

    /// Single job projection, `None` if unknown.
    Job { job: Option<Box<Job>> },

    /// Worker health snapshot.
    Status { health: RuntimeHealth },

    /// `signal` targeted a job whose wait record has a different correlation key.
    SignalMismatch,

    /// `signal` or `cancel` targeted a job that isn't in the expected state.
    NotWaiting,

    /// Error response.
    Error { message: String },
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
