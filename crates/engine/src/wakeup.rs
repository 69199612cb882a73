// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wake-up Index (§4.6): parks jobs awaiting a correlation key and wakes
//! idle workers as soon as a job becomes claimable, instead of making them
//! poll on a fixed sleep.

use ajr_core::{CorrelationKey, JobId, TenantId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParkKey {
    pub tenant_id: TenantId,
    pub agent_id: String,
    pub correlation_key: CorrelationKey,
}

impl ParkKey {
    pub fn new(tenant_id: TenantId, agent_id: impl Into<String>, correlation_key: CorrelationKey) -> Self {
        Self { tenant_id, agent_id: agent_id.into(), correlation_key }
    }
}

pub struct WakeupIndex {
    parked: Mutex<HashMap<ParkKey, JobId>>,
    ready_tx: broadcast::Sender<JobId>,
}

impl Default for WakeupIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeupIndex {
    pub fn new() -> Self {
        let (ready_tx, _) = broadcast::channel(1024);
        Self { parked: Mutex::new(HashMap::new()), ready_tx }
    }

    /// Register a parked job under its wait key, called right after a
    /// `job_waiting` event is appended.
    pub fn park(&self, key: ParkKey, job_id: JobId) {
        self.parked.lock().insert(key, job_id);
    }

    /// Remove a park entry for the given job, regardless of key, called
    /// after the job is resumed or cancelled. O(n) in the number of parked
    /// jobs; acceptable for the in-memory reference index.
    pub fn unpark_job(&self, job_id: JobId) {
        self.parked.lock().retain(|_, v| *v != job_id);
    }

    pub fn lookup(&self, key: &ParkKey) -> Option<JobId> {
        self.parked.lock().get(key).copied()
    }

    /// Called when a job becomes claimable (submit, resume, reclaim).
    pub fn notify_ready(&self, job_id: JobId) {
        let _ = self.ready_tx.send(job_id);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobId> {
        self.ready_tx.subscribe()
    }

    /// Called by an idle worker in place of a fixed sleep. Returns the job
    /// id that became ready, or `None` on timeout.
    pub async fn receive(rx: &mut broadcast::Receiver<JobId>, timeout: Duration) -> Option<JobId> {
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Ok(job_id)) => Some(job_id),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "wakeup_tests.rs"]
mod tests;
