// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Event Store (§4.1): append-only per-job event log with optimistic
//! concurrency, plus the lease table and claim primitive built on top of it.

use ajr_core::{
    AgentInstance, AgentInstanceStatus, AttemptId, Checkpoint, CorrelationKey, Event, EventRecord,
    Job, JobConfig, JobId, JobStatus, Lease, Message, MessageId, StoreError, WorkerId,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::state::MaterializedState;

/// Result of a successful claim (§4.1 `claim` / `claim_specific`).
#[derive(Debug, Clone)]
pub struct ClaimedJob {
    pub job_id: JobId,
    pub attempt_id: AttemptId,
    pub expected_version: u64,
}

/// Parameters narrowing which job a `claim` call is willing to take.
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub capabilities: Option<BTreeSet<String>>,
    pub queue: Option<String>,
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// §6 submit interface: seeds the job projection, appends `job_created`.
    async fn submit(&self, config: JobConfig, now_ms: u64) -> Result<JobId, StoreError>;

    async fn get_job(&self, job_id: JobId) -> Option<Job>;

    async fn get_checkpoint(&self, job_id: JobId) -> Checkpoint;

    /// Attach the agent instance identified by `agent_id` to `job_id`, if
    /// such an instance is registered. Best-effort: a job without a
    /// matching agent instance runs without one (§5 shared-resource policy).
    async fn attach_agent_instance(&self, agent_id: &str, job_id: JobId, status: AgentInstanceStatus);

    async fn get_agent_instance(&self, agent_id: &str) -> Option<AgentInstance>;

    /// §4.7 Inbox Poller: agent ids with at least one delivery-eligible,
    /// unconsumed message, who currently hold no job.
    async fn agents_with_pending_inbox(&self, now_ms: u64) -> Vec<String>;

    /// The oldest delivery-eligible, unconsumed message addressed to `agent_id`.
    async fn oldest_pending_message(&self, agent_id: &str, now_ms: u64) -> Option<Message>;

    /// Submit a job on behalf of an inbox message and mark that message consumed
    /// by the new job, in one step so two pollers can't double-deliver it.
    async fn submit_for_message(&self, message_id: MessageId, config: JobConfig, now_ms: u64) -> Result<JobId, StoreError>;

    /// §6 cancel interface: idempotent. Sets `cancel_requested_at`; a job
    /// already `waiting` transitions straight to `job_cancelled` since no
    /// worker is currently polling it. Terminal jobs are left untouched.
    async fn request_cancel(&self, job_id: JobId, now_ms: u64) -> Result<(), StoreError>;

    /// §6 signal interface: appends `job_resumed` if `correlation_key`
    /// matches the job's current `job_waiting` record.
    async fn signal(
        &self,
        job_id: JobId,
        correlation_key: CorrelationKey,
        payload: Option<serde_json::Value>,
        now_ms: u64,
    ) -> Result<(), StoreError>;

    /// Optimistic CAS append. Succeeds only if `expected_version` equals the
    /// current max version for `job_id`; atomic with any lease mutation the
    /// event type implies.
    async fn append(
        &self,
        job_id: JobId,
        expected_version: u64,
        event: Event,
        attempt_id: AttemptId,
        now_ms: u64,
    ) -> Result<u64, StoreError>;

    async fn list_events(&self, job_id: JobId) -> Result<(Vec<EventRecord>, u64), StoreError>;

    async fn claim(
        &self,
        worker_id: WorkerId,
        filter: ClaimFilter,
        lease_ms: u64,
        now_ms: u64,
    ) -> Result<ClaimedJob, StoreError>;

    async fn claim_specific(
        &self,
        worker_id: WorkerId,
        job_id: JobId,
        lease_ms: u64,
        now_ms: u64,
    ) -> Result<ClaimedJob, StoreError>;

    async fn heartbeat(&self, worker_id: WorkerId, job_id: JobId, lease_ms: u64, now_ms: u64) -> Result<(), StoreError>;

    /// Live event feed for observers. Part of the contract, unused by the core.
    fn watch(&self, job_id: JobId) -> broadcast::Receiver<EventRecord>;

    /// Sweep leases past `expires_at` and make their jobs reclaimable again,
    /// skipping jobs whose latest event is `job_waiting` (§4.1 Reclamation).
    /// Returns the ids of jobs whose lease was reclaimed.
    async fn reclaim_expired(&self, now_ms: u64) -> Vec<JobId>;
}

struct Inner {
    state: MaterializedState,
    logs: HashMap<JobId, Vec<EventRecord>>,
    leases: HashMap<JobId, Lease>,
    channels: HashMap<JobId, broadcast::Sender<EventRecord>>,
}

impl Inner {
    fn max_version(&self, job_id: &JobId) -> u64 {
        self.logs.get(job_id).and_then(|log| log.last()).map(|r| r.version).unwrap_or(0)
    }

    fn latest_event(&self, job_id: &JobId) -> Option<&Event> {
        self.logs.get(job_id).and_then(|log| log.last()).map(|r| &r.event)
    }

    fn broadcast(&mut self, job_id: JobId, record: EventRecord) {
        let tx = self.channels.entry(job_id).or_insert_with(|| broadcast::channel(64).0);
        let _ = tx.send(record);
    }
}

/// Reference backend: all state lives in process memory behind a mutex.
/// Suitable for single-process deployments and tests; a relational backend
/// implements the same trait against `jobs` / `job_events` / `job_leases`
/// tables (§6 persisted state layout).
pub struct InMemoryEventStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: MaterializedState::new(),
                logs: HashMap::new(),
                leases: HashMap::new(),
                channels: HashMap::new(),
            })),
        }
    }

    /// Register a job's initial projection before any events are appended
    /// for it. The caller (submit interface / inbox poller) is responsible
    /// for also appending the matching `job_created` event.
    pub fn seed_job(&self, job: Job) {
        self.inner.lock().state.insert_job(job);
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&MaterializedState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    /// Test/bootstrap helper: register an agent instance and a message in
    /// its inbox, without going through the event log.
    pub fn seed_agent_instance_and_message(&self, instance: ajr_core::AgentInstance, message: Message) {
        let mut inner = self.inner.lock();
        inner.state.insert_agent_instance(instance);
        inner.state.insert_message(message);
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn submit(&self, config: JobConfig, now_ms: u64) -> Result<JobId, StoreError> {
        let job_id = config.id;
        let goal = config.goal.clone();
        self.seed_job(Job::new_with_epoch_ms(config, now_ms));
        self.append(job_id, 0, Event::JobCreated { goal }, AttemptId::new(), now_ms).await?;
        Ok(job_id)
    }

    async fn get_job(&self, job_id: JobId) -> Option<Job> {
        self.inner.lock().state.get_job(&job_id).cloned()
    }

    async fn get_checkpoint(&self, job_id: JobId) -> Checkpoint {
        self.inner.lock().state.checkpoints.get(&job_id).cloned().unwrap_or_else(|| Checkpoint::new(job_id))
    }

    async fn attach_agent_instance(&self, agent_id: &str, job_id: JobId, status: AgentInstanceStatus) {
        if let Some(instance) = self.inner.lock().state.agent_instances.get_mut(agent_id) {
            instance.attach(job_id, status);
        }
    }

    async fn get_agent_instance(&self, agent_id: &str) -> Option<AgentInstance> {
        self.inner.lock().state.agent_instances.get(agent_id).cloned()
    }

    async fn agents_with_pending_inbox(&self, now_ms: u64) -> Vec<String> {
        self.inner.lock().state.agents_with_pending_inbox(now_ms)
    }

    async fn oldest_pending_message(&self, agent_id: &str, now_ms: u64) -> Option<Message> {
        self.inner
            .lock()
            .state
            .messages
            .values()
            .filter(|m| m.to_agent_id.to_string() == agent_id && m.is_delivery_eligible(now_ms))
            .min_by_key(|m| m.created_at_ms)
            .cloned()
    }

    async fn submit_for_message(&self, message_id: MessageId, config: JobConfig, now_ms: u64) -> Result<JobId, StoreError> {
        let job_id = self.submit(config, now_ms).await?;
        if let Some(msg) = self.inner.lock().state.messages.get_mut(&message_id.to_string()) {
            msg.mark_consumed(job_id, now_ms);
        }
        Ok(job_id)
    }

    async fn request_cancel(&self, job_id: JobId, now_ms: u64) -> Result<(), StoreError> {
        let (should_append_cancelled, version) = {
            let mut inner = self.inner.lock();
            let Some(job) = inner.state.jobs.get_mut(&job_id) else {
                return Err(StoreError::NotFound { job_id });
            };
            if job.is_terminal() {
                return Ok(());
            }
            job.cancel_requested_at = Some(now_ms);
            let waiting = job.status == JobStatus::Waiting;
            (waiting, inner.max_version(&job_id))
        };
        if should_append_cancelled {
            self.append(job_id, version, Event::JobCancelled, AttemptId::new(), now_ms).await?;
        }
        Ok(())
    }

    async fn signal(
        &self,
        job_id: JobId,
        correlation_key: CorrelationKey,
        payload: Option<serde_json::Value>,
        now_ms: u64,
    ) -> Result<(), StoreError> {
        let version = {
            let inner = self.inner.lock();
            let Some(job) = inner.state.jobs.get(&job_id) else {
                return Err(StoreError::NotFound { job_id });
            };
            if job.status != JobStatus::Waiting {
                return Err(StoreError::NotWaiting { job_id });
            }
            let Some(wait) = inner.state.waits.get(&job_id) else {
                return Err(StoreError::NotWaiting { job_id });
            };
            if !wait.key_matches(&correlation_key) {
                return Err(StoreError::CorrelationMismatch { job_id });
            }
            inner.max_version(&job_id)
        };
        self.append(job_id, version, Event::JobResumed { signal_payload: payload }, AttemptId::new(), now_ms)
            .await?;
        Ok(())
    }

    async fn append(
        &self,
        job_id: JobId,
        expected_version: u64,
        event: Event,
        attempt_id: AttemptId,
        now_ms: u64,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();
        let current = inner.max_version(&job_id);
        if current != expected_version {
            return Err(StoreError::VersionMismatch { job_id, expected: expected_version, current });
        }
        if let Some(lease) = inner.leases.get(&job_id) {
            if lease.attempt_id != attempt_id && !event.is_claimable_terminal_event() {
                return Err(StoreError::LeaseLost { job_id });
            }
        }

        let new_version = current + 1;
        let record = EventRecord::new(job_id, new_version, event, attempt_id, now_ms);
        inner.state.apply(&record);
        if record.event.is_terminal() {
            inner.leases.remove(&job_id);
        }
        inner.logs.entry(job_id).or_default().push(record.clone());
        inner.broadcast(job_id, record);
        debug!(job_id = %job_id, version = new_version, "appended event");
        Ok(new_version)
    }

    async fn list_events(&self, job_id: JobId) -> Result<(Vec<EventRecord>, u64), StoreError> {
        let inner = self.inner.lock();
        let log = inner.logs.get(&job_id).cloned().unwrap_or_default();
        let max_version = log.last().map(|r| r.version).unwrap_or(0);
        Ok((log, max_version))
    }

    /// A job is eligible here when it's never run (`None`/`JobCreated`),
    /// resumed from a wait (`JobResumed`), or failed an attempt with
    /// `retryable: true` (§4.5 Retry) - in every case checked against the
    /// lease table so a currently-leased job is never claimed twice.
    async fn claim(
        &self,
        worker_id: WorkerId,
        filter: ClaimFilter,
        lease_ms: u64,
        now_ms: u64,
    ) -> Result<ClaimedJob, StoreError> {
        let mut inner = self.inner.lock();
        let candidate = inner
            .state
            .jobs
            .values()
            .filter(|job| {
                let eligible = matches!(
                    inner.latest_event(&job.id),
                    None | Some(Event::JobCreated { .. })
                        | Some(Event::JobResumed { .. })
                        | Some(Event::JobFailed { retryable: true, .. })
                );
                let caps_ok = filter
                    .capabilities
                    .as_ref()
                    .is_none_or(|offered| job.capabilities_satisfied_by(offered));
                let queue_ok = filter.queue.as_ref().is_none_or(|q| &job.queue == q);
                eligible && caps_ok && queue_ok && !inner.leases.contains_key(&job.id)
            })
            .map(|job| job.id)
            .next();

        let Some(job_id) = candidate else {
            return Err(StoreError::NoJob);
        };

        let attempt_id = AttemptId::new();
        let expected_version = inner.max_version(&job_id);
        inner
            .leases
            .insert(job_id, Lease::new(job_id, worker_id, attempt_id, now_ms + lease_ms));
        drop(inner);

        let new_version = self
            .append(job_id, expected_version, Event::JobRunning { worker_id: worker_id.to_string() }, attempt_id, now_ms)
            .await?;

        Ok(ClaimedJob { job_id, attempt_id, expected_version: new_version })
    }

    async fn claim_specific(
        &self,
        worker_id: WorkerId,
        job_id: JobId,
        lease_ms: u64,
        now_ms: u64,
    ) -> Result<ClaimedJob, StoreError> {
        let mut inner = self.inner.lock();
        if inner.leases.contains_key(&job_id) {
            return Err(StoreError::NotClaimable { job_id });
        }
        let eligible = matches!(
            inner.latest_event(&job_id),
            None | Some(Event::JobCreated { .. })
                | Some(Event::JobResumed { .. })
                | Some(Event::JobFailed { retryable: true, .. })
        );
        if !eligible {
            return Err(StoreError::NotClaimable { job_id });
        }
        let attempt_id = AttemptId::new();
        let expected_version = inner.max_version(&job_id);
        inner
            .leases
            .insert(job_id, Lease::new(job_id, worker_id, attempt_id, now_ms + lease_ms));
        drop(inner);

        let new_version = self
            .append(job_id, expected_version, Event::JobRunning { worker_id: worker_id.to_string() }, attempt_id, now_ms)
            .await?;

        Ok(ClaimedJob { job_id, attempt_id, expected_version: new_version })
    }

    async fn heartbeat(&self, worker_id: WorkerId, job_id: JobId, lease_ms: u64, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        match inner.leases.get_mut(&job_id) {
            Some(lease) if lease.worker_id == worker_id => {
                lease.extend(now_ms, lease_ms);
                Ok(())
            }
            _ => Err(StoreError::LeaseLost { job_id }),
        }
    }

    fn watch(&self, job_id: JobId) -> broadcast::Receiver<EventRecord> {
        let mut inner = self.inner.lock();
        inner.channels.entry(job_id).or_insert_with(|| broadcast::channel(64).0).subscribe()
    }

    async fn reclaim_expired(&self, now_ms: u64) -> Vec<JobId> {
        let mut inner = self.inner.lock();
        let expired: Vec<JobId> = inner
            .leases
            .iter()
            .filter(|(_, lease)| lease.is_expired(now_ms))
            .map(|(job_id, _)| *job_id)
            .collect();

        let mut reclaimed = Vec::new();
        for job_id in expired {
            let parked = matches!(inner.latest_event(&job_id), Some(Event::JobWaiting { .. }));
            if parked {
                continue;
            }
            inner.leases.remove(&job_id);
            warn!(job_id = %job_id, "reclaimed expired lease");
            reclaimed.push(job_id);
        }
        reclaimed
    }
}

#[cfg(test)]
#[path = "event_store_tests.rs"]
mod tests;
