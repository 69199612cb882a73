// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_instance_is_idle_and_free() {
    let inst = AgentInstance::new(TenantId::new("acme"), "support-bot");
    assert_eq!(inst.status, AgentInstanceStatus::Idle);
    assert!(inst.is_free());
}

#[test]
fn attach_sets_current_job_and_status() {
    let mut inst = AgentInstance::new(TenantId::new("acme"), "support-bot");
    let job_id = JobId::new();
    inst.attach(job_id.clone(), AgentInstanceStatus::Running);
    assert!(!inst.is_free());
    assert_eq!(inst.current_job_id, Some(job_id));
    assert_eq!(inst.status, AgentInstanceStatus::Running);
}

#[test]
fn detach_clears_current_job_and_resets_to_idle() {
    let mut inst = AgentInstance::new(TenantId::new("acme"), "support-bot");
    inst.attach(JobId::new(), AgentInstanceStatus::Waiting);
    inst.detach();
    assert!(inst.is_free());
    assert_eq!(inst.status, AgentInstanceStatus::Idle);
}

#[test]
fn status_display_matches_vocabulary() {
    assert_eq!(AgentInstanceStatus::Idle.to_string(), "idle");
    assert_eq!(AgentInstanceStatus::Running.to_string(), "running");
    assert_eq!(AgentInstanceStatus::Waiting.to_string(), "waiting");
}
