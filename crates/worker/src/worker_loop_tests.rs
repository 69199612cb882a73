// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ajr_adapters::{EchoChatModel, FixedSingleNodePlanner, StaticToolRegistry, UnimplementedWorkflowRegistry};
use ajr_core::{FakeClock, JobConfig, JobStatus, TenantId};
use ajr_storage::InMemoryEventStore;
use std::time::Duration as StdDuration;

fn test_config() -> WorkerConfig {
    WorkerConfig {
        worker_id: "test-worker".into(),
        max_concurrency: 2,
        poll_interval_ms: 10,
        lease_duration_ms: 2_000,
        max_attempts: 3,
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn claims_and_completes_a_submitted_job() {
    let store: Arc<dyn EventStore> = Arc::new(InMemoryEventStore::new());
    let config = JobConfig::builder(TenantId::new("acme"), "bot", "reply to the user").build();
    let job_id = store.submit(config, 0).await.unwrap();

    let clock = FakeClock::new();
    let executor = Arc::new(StepExecutor::new(
        store.clone(),
        FixedSingleNodePlanner,
        EchoChatModel,
        StaticToolRegistry::new(),
        UnimplementedWorkflowRegistry,
        clock.clone(),
    ));
    let wakeup = Arc::new(WakeupIndex::new());
    let health = HealthHandle::new();
    let worker = Arc::new(WorkerLoop::new(test_config(), store.clone(), executor, wakeup, clock, health));

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(worker.run(shutdown.clone()));

    let deadline = tokio::time::Instant::now() + StdDuration::from_secs(2);
    loop {
        let job = store.get_job(job_id).await.unwrap();
        if job.status == JobStatus::Completed {
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "job never completed: {:?}", job.status);
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }

    shutdown.cancel();
    let _ = tokio::time::timeout(StdDuration::from_secs(1), handle).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_tool_fails_the_job_without_retry() {
    let store: Arc<dyn EventStore> = Arc::new(InMemoryEventStore::new());
    let config = JobConfig::builder(TenantId::new("acme"), "bot", "call a missing tool").build();
    let job_id = store.submit(config, 0).await.unwrap();

    struct MissingToolPlanner;
    #[async_trait::async_trait]
    impl ajr_adapters::Planner for MissingToolPlanner {
        async fn plan(&self, _goal: &str, _memory: &serde_json::Value) -> Result<ajr_core::TaskGraph, ajr_adapters::PlannerError> {
            let n = ajr_core::NodeId::new("call_tool");
            let node = ajr_core::Node::new(n.clone(), ajr_core::NodeKind::Tool, serde_json::json!({"tool": "missing"}));
            ajr_core::TaskGraph::new(vec![node], vec![], n.clone(), n)
                .map_err(|e| ajr_adapters::PlannerError::GoalRejected(e.to_string()))
        }
    }

    let clock = FakeClock::new();
    let executor = Arc::new(StepExecutor::new(
        store.clone(),
        MissingToolPlanner,
        EchoChatModel,
        StaticToolRegistry::new(),
        UnimplementedWorkflowRegistry,
        clock.clone(),
    ));
    let wakeup = Arc::new(WakeupIndex::new());
    let health = HealthHandle::new();
    let mut config = test_config();
    config.max_attempts = 1;
    let worker = Arc::new(WorkerLoop::new(config, store.clone(), executor, wakeup, clock, health));

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(worker.run(shutdown.clone()));

    let deadline = tokio::time::Instant::now() + StdDuration::from_secs(2);
    loop {
        let job = store.get_job(job_id).await.unwrap();
        if job.status == JobStatus::Failed {
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "job never failed: {:?}", job.status);
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }

    shutdown.cancel();
    let _ = tokio::time::timeout(StdDuration::from_secs(1), handle).await;
}
