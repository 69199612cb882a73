// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ids::CorrelationKey;
use crate::wait::WaitType;

#[test]
fn type_name_matches_enumerated_vocabulary() {
    assert_eq!(Event::JobCreated { goal: "x".into() }.type_name(), "job_created");
    assert_eq!(Event::JobCancelled.type_name(), "job_cancelled");
}

#[test]
fn only_terminal_events_are_terminal() {
    assert!(Event::JobCompleted { output: serde_json::json!(null) }.is_terminal());
    assert!(Event::JobFailed { reason: "x".into(), retryable: false }.is_terminal());
    assert!(Event::JobCancelled.is_terminal());
    assert!(!Event::JobCreated { goal: "x".into() }.is_terminal());
    assert!(!Event::NodeStarted { node_id: NodeId::new("a"), kind: NodeKind::Tool }.is_terminal());
}

#[test]
fn created_and_resumed_are_claimable_but_running_is_not() {
    assert!(Event::JobCreated { goal: "x".into() }.is_claimable_terminal_event());
    assert!(Event::JobResumed { signal_payload: None }.is_claimable_terminal_event());
    assert!(!Event::JobRunning { worker_id: "w1".into() }.is_claimable_terminal_event());
    assert!(!Event::JobWaiting {
        wait: WaitRecord::new(NodeId::new("a"), CorrelationKey::new("k"), WaitType::Signal)
    }
    .is_claimable_terminal_event());
}

#[test]
fn event_record_round_trips_through_json() {
    let rec = EventRecord::new(
        JobId::new(),
        1,
        Event::JobCreated { goal: "ship it".into() },
        AttemptId::new(),
        1_000,
    );
    let json = serde_json::to_string(&rec).unwrap();
    let back: EventRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(rec, back);
}
