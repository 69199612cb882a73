// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ajr_core::JobBuilder;

#[test]
fn format_job_mentions_status_and_agent() {
    let job = JobBuilder::default().agent_id("support-bot".to_string()).build();
    let text = format_job(&job);
    assert!(text.contains("support-bot"));
    assert!(text.contains("pending"));
}

#[test]
fn format_job_flags_a_cancel_request() {
    let job = JobBuilder::default().cancel_requested_at(42).build();
    assert!(format_job(&job).contains("cancel_requested"));
}
