// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn submit_round_trips_through_json() {
    let req = Request::Submit {
        tenant_id: "acme".into(),
        agent_id: "bot".into(),
        goal: "reply to the user".into(),
        required_capabilities: ["gpu".to_string()].into_iter().collect(),
        queue: "realtime".into(),
    };
    let json = serde_json::to_string(&req).expect("serialize failed");
    let back: Request = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(req, back);
}

#[test]
fn status_has_no_payload_fields() {
    let json = serde_json::to_value(Request::Status).expect("serialize failed");
    assert_eq!(json, serde_json::json!({"type": "Status"}));
}
