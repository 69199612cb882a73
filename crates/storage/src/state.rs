// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state: the current-state projection derived by folding
//! events over the Job Metadata Store, the Agent Instance & Messaging
//! Store, and checkpoints (§3, §4.2).

use ajr_core::{
    AgentInstance, AgentInstanceStatus, Checkpoint, Event, EventRecord, Job, JobId, JobStatus,
    Message, WaitRecord,
};
use std::collections::HashMap;

/// State folded from the event log. All handlers here must be idempotent:
/// replaying the same `EventRecord` twice must leave state unchanged the
/// second time, since both live append and crash-recovery replay call
/// [`MaterializedState::apply`] on the same records.
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    pub jobs: HashMap<JobId, Job>,
    pub checkpoints: HashMap<JobId, Checkpoint>,
    pub agent_instances: HashMap<String, AgentInstance>,
    pub messages: HashMap<String, Message>,
    /// The wait record of each currently-parked job, keyed by job id.
    /// Populated on `job_waiting`, cleared on `job_resumed` or any terminal
    /// event; `signal` consults this to validate a correlation key (§4.6).
    pub waits: HashMap<JobId, WaitRecord>,
}

impl MaterializedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_job(&self, job_id: &JobId) -> Option<&Job> {
        self.jobs.get(job_id)
    }

    pub fn insert_job(&mut self, job: Job) {
        self.checkpoints.entry(job.id).or_insert_with(|| Checkpoint::new(job.id));
        self.jobs.insert(job.id, job);
    }

    pub fn insert_agent_instance(&mut self, instance: AgentInstance) {
        self.agent_instances.insert(instance.id.to_string(), instance);
    }

    pub fn insert_message(&mut self, message: Message) {
        self.messages.insert(message.id.to_string(), message);
    }

    /// Fold a single event record into state. See the idempotency
    /// requirement on the struct doc comment.
    pub fn apply(&mut self, record: &EventRecord) {
        let Some(job) = self.jobs.get_mut(&record.job_id) else {
            // An event for a job we haven't seen `job_created` for yet;
            // can happen during out-of-order replay of a partial log slice.
            return;
        };

        match &record.event {
            Event::JobCreated { .. } => {
                // Handled by the caller via `insert_job` prior to folding
                // further events for this job; nothing else to do here.
            }
            Event::JobRunning { .. } => {
                job.status = JobStatus::Running;
            }
            Event::PlanGenerated { .. } => {
                // The graph itself is not part of the projection; only its
                // hash is recorded in the event, for audit.
            }
            Event::NodeStarted { .. } => {}
            Event::NodeFinished { node_id, output } => {
                if let Some(cp) = self.checkpoints.get_mut(&record.job_id) {
                    cp.advance(node_id.clone(), output.clone(), record.timestamp_ms);
                }
                job.cursor_node_id = Some(node_id.clone());
            }
            Event::ToolInvoked { .. } | Event::ToolReturned { .. } => {}
            Event::JobWaiting { wait } => {
                job.status = JobStatus::Waiting;
                self.waits.insert(record.job_id, wait.clone());
            }
            Event::JobResumed { .. } => {
                job.status = JobStatus::Pending;
                self.waits.remove(&record.job_id);
            }
            Event::JobCompleted { .. } => {
                job.status = JobStatus::Completed;
                self.waits.remove(&record.job_id);
                self.release_agent_for(&record.job_id);
            }
            Event::JobFailed { retryable, .. } => {
                if *retryable {
                    job.retry_count += 1;
                    job.status = JobStatus::Pending;
                } else {
                    job.status = JobStatus::Failed;
                    self.release_agent_for(&record.job_id);
                }
                self.waits.remove(&record.job_id);
            }
            Event::JobCancelled => {
                job.status = JobStatus::Cancelled;
                self.waits.remove(&record.job_id);
                self.release_agent_for(&record.job_id);
            }
        }
        job.updated_at_ms = record.timestamp_ms;
    }

    fn release_agent_for(&mut self, job_id: &JobId) {
        for instance in self.agent_instances.values_mut() {
            if instance.current_job_id.as_ref() == Some(job_id) {
                instance.detach();
            }
        }
    }

    /// Agent ids whose inbox has at least one delivery-eligible, unconsumed
    /// message and who currently hold no job (§4.7 inbox poller).
    pub fn agents_with_pending_inbox(&self, now_ms: u64) -> Vec<String> {
        let mut eligible: Vec<String> = self
            .messages
            .values()
            .filter(|m| m.is_delivery_eligible(now_ms))
            .map(|m| m.to_agent_id.to_string())
            .collect();
        eligible.retain(|agent_id| match self.agent_instances.get(agent_id) {
            Some(inst) => inst.status == AgentInstanceStatus::Idle && inst.is_free(),
            None => true,
        });
        eligible.sort();
        eligible.dedup();
        eligible
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
