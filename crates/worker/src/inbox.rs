// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbox Poller (§4.7): turns unconsumed, delivery-eligible agent messages
//! into jobs, and wakes the Wake-up Index so an idle worker picks them up
//! without waiting out its poll interval.

use std::sync::Arc;
use std::time::Duration;

use ajr_core::{Clock, JobConfig, TenantId};
use ajr_engine::WakeupIndex;
use ajr_storage::EventStore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct InboxPoller<C> {
    store: Arc<dyn EventStore>,
    wakeup: Arc<WakeupIndex>,
    clock: C,
    interval: Duration,
}

impl<C: Clock> InboxPoller<C> {
    pub fn new(store: Arc<dyn EventStore>, wakeup: Arc<WakeupIndex>, clock: C, interval: Duration) -> Self {
        Self { store, wakeup, clock, interval }
    }

    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.sweep().await;
                }
                _ = shutdown.cancelled() => break,
            }
        }
    }

    async fn sweep(&self) {
        let now_ms = self.clock.epoch_ms();
        for agent_id in self.store.agents_with_pending_inbox(now_ms).await {
            let Some(message) = self.store.oldest_pending_message(&agent_id, now_ms).await else { continue };
            let tenant_id = self
                .store
                .get_agent_instance(&agent_id)
                .await
                .map(|instance| instance.tenant_id)
                .unwrap_or_else(|| TenantId::new("default"));
            let config = JobConfig::builder(
                tenant_id,
                agent_id.clone(),
                format!("handle {} message on channel {}", message.kind, message.channel),
            )
            .build();

            match self.store.submit_for_message(message.id, config, now_ms).await {
                Ok(job_id) => {
                    debug!(agent_id = %agent_id, job_id = %job_id, "inbox poller created job");
                    self.wakeup.notify_ready(job_id);
                }
                Err(err) => warn!(agent_id = %agent_id, error = %err, "inbox poller failed to create job"),
            }
        }
    }
}

#[cfg(test)]
#[path = "inbox_tests.rs"]
mod tests;
