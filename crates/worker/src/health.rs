// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, lock-protected `RuntimeHealth` snapshot the IPC listener serves
//! for `Request::Status`.

use ajr_core::RuntimeHealth;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct HealthHandle(Arc<Inner>);

#[derive(Default)]
struct Inner {
    base: Mutex<RuntimeHealth>,
    jobs_running: AtomicUsize,
}

impl HealthHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RuntimeHealth {
        let mut health = self.0.base.lock().clone();
        health.jobs_running = self.0.jobs_running.load(Ordering::Relaxed);
        health
    }

    pub fn record_reclaim(&self, reclaimed: usize, now_ms: u64) {
        if reclaimed == 0 {
            return;
        }
        let mut health = self.0.base.lock();
        health.leases_reclaimed += reclaimed as u64;
        health.last_reclaim_ms = now_ms;
    }

    pub fn job_started(&self) {
        self.0.jobs_running.fetch_add(1, Ordering::Relaxed);
    }

    pub fn job_finished(&self) {
        self.0.jobs_running.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_error(&self, message: impl Into<String>) {
        self.0.base.lock().last_error = Some(message.into());
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
