// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn job_id_new_is_unique_and_prefixed() {
    let a = JobId::new();
    let b = JobId::new();
    assert_ne!(a, b);
    assert!(a.as_str().starts_with("job-"));
}

#[test]
fn attempt_id_round_trips() {
    let id = AttemptId::new();
    let parsed = AttemptId::from_string(id.as_str());
    assert_eq!(id, parsed);
}

#[test]
fn tenant_id_equality_by_value() {
    assert_eq!(TenantId::new("acme"), TenantId::from("acme"));
    assert_ne!(TenantId::new("acme"), TenantId::new("other"));
}

#[test]
fn node_id_ordering_is_lexicographic() {
    let mut ids = vec![NodeId::new("b"), NodeId::new("a"), NodeId::new("c")];
    ids.sort();
    assert_eq!(ids, vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")]);
}

#[test]
fn worker_id_display_matches_input() {
    let id = WorkerId::new("worker-east-1");
    assert_eq!(id.to_string(), "worker-east-1");
}

#[test]
fn correlation_key_mismatch_is_not_equal() {
    assert_ne!(CorrelationKey::new("approve-42"), CorrelationKey::new("wrong-key"));
}
