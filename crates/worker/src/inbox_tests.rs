// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ajr_core::{AgentInstance, FakeClock, MessageKind, TenantId};
use ajr_storage::InMemoryEventStore;

#[tokio::test]
async fn sweep_turns_an_eligible_message_into_a_job_and_notifies_ready() {
    let store = Arc::new(InMemoryEventStore::new());
    let instance = AgentInstance::new(TenantId::new("acme"), "support-bot");
    let agent_id = instance.id;
    let mut message = ajr_core::Message::new(agent_id, "webhooks", MessageKind::Webhook, serde_json::json!({}), 0);
    message.delivered_at_ms = Some(0);
    store.seed_agent_instance_and_message(instance, message);

    let wakeup = Arc::new(WakeupIndex::new());
    let mut rx = wakeup.subscribe();
    let poller = InboxPoller::new(store.clone() as Arc<dyn EventStore>, wakeup, FakeClock::new(), std::time::Duration::from_millis(10));

    poller.sweep().await;

    assert!(store.agents_with_pending_inbox(1).await.is_empty());
    let job_id = WakeupIndex::receive(&mut rx, std::time::Duration::from_millis(100)).await;
    assert!(job_id.is_some());
}

#[tokio::test]
async fn sweep_is_a_no_op_with_no_pending_inbox() {
    let store = Arc::new(InMemoryEventStore::new());
    let wakeup = Arc::new(WakeupIndex::new());
    let poller = InboxPoller::new(store as Arc<dyn EventStore>, wakeup, FakeClock::new(), std::time::Duration::from_millis(10));
    poller.sweep().await;
}
