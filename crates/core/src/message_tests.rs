// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn msg() -> Message {
    Message::new(AgentInstanceId::new(), "webhooks", MessageKind::Webhook, serde_json::json!({}), 100)
}

#[test]
fn not_eligible_before_delivery_or_schedule() {
    assert!(!msg().is_delivery_eligible(200));
}

#[test]
fn delivered_message_is_eligible() {
    let mut m = msg();
    m.delivered_at_ms = Some(150);
    assert!(m.is_delivery_eligible(200));
}

#[test]
fn scheduled_message_eligible_only_once_due() {
    let mut m = msg();
    m.scheduled_at_ms = Some(500);
    assert!(!m.is_delivery_eligible(400));
    assert!(m.is_delivery_eligible(500));
}

#[test]
fn consumed_message_is_never_eligible() {
    let mut m = msg();
    m.delivered_at_ms = Some(150);
    m.mark_consumed(JobId::new(), 300);
    assert!(!m.is_delivery_eligible(9_999));
}

#[test]
fn expired_message_is_not_eligible() {
    let mut m = msg();
    m.delivered_at_ms = Some(150);
    m.expires_at_ms = Some(200);
    assert!(!m.is_delivery_eligible(300));
}
