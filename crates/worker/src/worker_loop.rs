// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Worker Loop (§4.5, §5): claims jobs from the Event Store, enforces
//! per-worker concurrency, runs heartbeats, polls for cancellation, and
//! classifies the Step Executor's outcome into a terminal event.

use std::sync::Arc;
use std::time::Duration;

use ajr_adapters::{ChatModel, Planner, ToolRegistry, WorkflowRegistry};
use ajr_core::{AgentInstanceStatus, Clock, Event, JobId, WorkerId};
use ajr_engine::{Outcome, StepExecutor, WakeupIndex};
use ajr_storage::{ClaimFilter, EventStore};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::WorkerConfig;
use crate::health::HealthHandle;

/// Drives the per-process claim/execute/heartbeat cycle described in §4.5.
pub struct WorkerLoop<P, M, T, W, C> {
    worker_id: WorkerId,
    store: Arc<dyn EventStore>,
    executor: Arc<StepExecutor<P, M, T, W, C>>,
    wakeup: Arc<WakeupIndex>,
    clock: C,
    config: WorkerConfig,
    health: HealthHandle,
}

impl<P, M, T, W, C> WorkerLoop<P, M, T, W, C>
where
    P: Planner + 'static,
    M: ChatModel + 'static,
    T: ToolRegistry + 'static,
    W: WorkflowRegistry + 'static,
    C: Clock + 'static,
{
    pub fn new(
        config: WorkerConfig,
        store: Arc<dyn EventStore>,
        executor: Arc<StepExecutor<P, M, T, W, C>>,
        wakeup: Arc<WakeupIndex>,
        clock: C,
        health: HealthHandle,
    ) -> Self {
        Self { worker_id: WorkerId::new(&config.worker_id), store, executor, wakeup, clock, config, health }
    }

    /// §4.5 Main loop. Runs until `shutdown` is cancelled, then returns once
    /// in-flight execution contexts drain or the shutdown timeout elapses.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut in_flight = Vec::new();

        while !shutdown.is_cancelled() {
            let Ok(permit) = semaphore.clone().acquire_owned().await else { break };

            let reclaimed = self.store.reclaim_expired(self.clock.epoch_ms()).await;
            self.health.record_reclaim(reclaimed.len(), self.clock.epoch_ms());
            for job_id in reclaimed {
                self.wakeup.notify_ready(job_id);
            }

            let filter = ClaimFilter {
                capabilities: (!self.config.capabilities.is_empty()).then(|| self.config.capabilities.clone()),
                queue: None,
            };

            match self.store.claim(self.worker_id.clone(), filter, self.config.lease_duration_ms, self.clock.epoch_ms()).await {
                Ok(claimed) => {
                    let this = Arc::clone(&self);
                    let job_shutdown = shutdown.clone();
                    in_flight.push(tokio::spawn(async move {
                        this.run_execution_context(claimed.job_id, claimed.attempt_id, claimed.expected_version, permit, job_shutdown).await;
                    }));
                }
                Err(ajr_core::StoreError::NoJob) => {
                    drop(permit);
                    let mut rx = self.wakeup.subscribe();
                    tokio::select! {
                        _ = WakeupIndex::receive(&mut rx, Duration::from_millis(self.config.poll_interval_ms)) => {}
                        _ = shutdown.cancelled() => break,
                    }
                }
                Err(err) => {
                    drop(permit);
                    warn!(worker_id = %self.worker_id, error = %err, "claim failed");
                    self.health.record_error(err.to_string());
                    tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
                }
            }
        }

        const JOB_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
        let drain = futures_join_all(in_flight);
        let _ = tokio::time::timeout(JOB_SHUTDOWN_TIMEOUT, drain).await;
    }

    /// §4.5 Execution context (a)-(h).
    async fn run_execution_context(
        self: Arc<Self>,
        job_id: JobId,
        attempt_id: ajr_core::AttemptId,
        version: u64,
        _permit: tokio::sync::OwnedSemaphorePermit,
        shutdown: CancellationToken,
    ) {
        self.health.job_started();
        let outcome_scope = async {
            let Some(job) = self.store.get_job(job_id).await else {
                warn!(job_id = %job_id, "claimed job vanished from the projection");
                return;
            };
            self.store.attach_agent_instance(&job.agent_id, job_id, AgentInstanceStatus::Running).await;

            let cancel = CancellationToken::new();
            let heartbeat = self.clone().spawn_heartbeat(job_id, cancel.clone());
            let cancel_poll = self.clone().spawn_cancel_poll(job_id, cancel.clone());

            let checkpoint = self.store.get_checkpoint(job_id).await;
            let run_result =
                self.executor.run(job_id, &job.goal, attempt_id, version, &checkpoint, &cancel).await;

            cancel.cancel();
            heartbeat.abort();
            cancel_poll.abort();

            match run_result {
                Ok(outcome) => self.finish(job_id, attempt_id, job.retry_count, outcome).await,
                Err(err) => {
                    warn!(job_id = %job_id, error = %err, "executor returned a store error; leaving job for lease reclamation");
                    self.health.record_error(err.to_string());
                }
            }
        };

        tokio::select! {
            _ = outcome_scope => {}
            _ = shutdown.cancelled() => {
                info!(job_id = %job_id, "shutdown requested mid-execution; job left for lease reclamation");
            }
        }
        self.health.job_finished();
    }

    async fn finish(&self, job_id: JobId, attempt_id: ajr_core::AttemptId, retry_count: u32, outcome: Outcome) {
        let now_ms = self.clock.epoch_ms();
        let event = match outcome {
            Outcome::Completed { output } => Some(Event::JobCompleted { output }),
            Outcome::Cancelled => Some(Event::JobCancelled),
            Outcome::Failed { reason, retryable } => {
                let retryable = retryable && retry_count + 1 < self.config.max_attempts;
                Some(Event::JobFailed { reason, retryable })
            }
            // The executor already appended `job_waiting` before parking.
            Outcome::Waiting => None,
        };
        let Some(event) = event else { return };

        let (_, version) = match self.store.list_events(job_id).await {
            Ok(v) => v,
            Err(err) => {
                warn!(job_id = %job_id, error = %err, "could not read job log before appending terminal event");
                return;
            }
        };
        if let Err(err) = self.store.append(job_id, version, event, attempt_id, now_ms).await {
            warn!(job_id = %job_id, error = %err, "failed to append terminal event");
            self.health.record_error(err.to_string());
        }
    }

    fn spawn_heartbeat(self: Arc<Self>, job_id: JobId, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        let period = Duration::from_millis((self.config.lease_duration_ms / 2).max(1));
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(period) => {
                        let now_ms = self.clock.epoch_ms();
                        if self.store.heartbeat(self.worker_id.clone(), job_id, self.config.lease_duration_ms, now_ms).await.is_err() {
                            warn!(job_id = %job_id, "lease lost; stopping heartbeat");
                            break;
                        }
                    }
                    _ = cancel.cancelled() => break,
                }
            }
        })
    }

    fn spawn_cancel_poll(self: Arc<Self>, job_id: JobId, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        const CANCEL_POLL_PERIOD: Duration = Duration::from_millis(500);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(CANCEL_POLL_PERIOD) => {
                        if let Some(job) = self.store.get_job(job_id).await {
                            if job.cancel_requested_at.is_some() {
                                cancel.cancel();
                                break;
                            }
                        }
                    }
                    _ = cancel.cancelled() => break,
                }
            }
        })
    }
}

async fn futures_join_all(handles: Vec<tokio::task::JoinHandle<()>>) {
    for handle in handles {
        let _ = handle.await;
    }
}

#[cfg(test)]
#[path = "worker_loop_tests.rs"]
mod tests;
