// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;

#[test]
fn new_job_starts_pending_with_no_cursor() {
    let config = JobConfig::builder("tenant-1", "agent-1", "echo hello").build();
    let job = Job::new(config, &FakeClock::new());
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.cursor_node_id.is_none());
    assert_eq!(job.retry_count, 0);
}

#[test]
fn terminal_states_are_detected() {
    for status in [JobStatus::Completed, JobStatus::Failed, JobStatus::Cancelled] {
        assert!(status.is_terminal(), "{status} should be terminal");
    }
    for status in [JobStatus::Pending, JobStatus::Running, JobStatus::Waiting] {
        assert!(!status.is_terminal(), "{status} should not be terminal");
    }
}

#[test]
fn capabilities_subset_check() {
    let mut config = JobConfig::builder("t", "a", "g");
    config = config.required_capabilities(["gpu".to_string(), "vision".to_string()].into());
    let job = Job::new(config.build(), &FakeClock::new());

    let offered: std::collections::BTreeSet<String> =
        ["gpu".to_string(), "vision".to_string(), "extra".to_string()].into();
    assert!(job.capabilities_satisfied_by(&offered));

    let insufficient: std::collections::BTreeSet<String> = ["gpu".to_string()].into();
    assert!(!job.capabilities_satisfied_by(&insufficient));
}

#[test]
fn unfiltered_claim_has_no_capability_requirement() {
    let config = JobConfig::builder("t", "a", "g").build();
    let job = Job::new(config, &FakeClock::new());
    assert!(job.capabilities_satisfied_by(&std::collections::BTreeSet::new()));
}

#[test]
fn job_status_display_matches_event_type_vocabulary() {
    assert_eq!(JobStatus::Waiting.to_string(), "waiting");
    assert_eq!(JobStatus::Cancelled.to_string(), "cancelled");
}
