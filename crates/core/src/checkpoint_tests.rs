// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn advance_updates_cursor_and_output() {
    let mut cp = Checkpoint::new(JobId::new());
    cp.advance(NodeId::new("validate"), serde_json::json!("hello"), 100);
    assert_eq!(cp.cursor_node_id, Some(NodeId::new("validate")));
    assert_eq!(cp.output_for(&NodeId::new("validate")), Some(&serde_json::json!("hello")));
}

#[test]
fn advance_twice_keeps_last_output() {
    let mut cp = Checkpoint::new(JobId::new());
    cp.advance(NodeId::new("a"), serde_json::json!(1), 100);
    cp.advance(NodeId::new("b"), serde_json::json!(2), 200);
    assert_eq!(cp.cursor_node_id, Some(NodeId::new("b")));
    assert_eq!(cp.node_outputs.len(), 2);
    assert_eq!(cp.updated_at_ms, 200);
}

#[test]
fn output_for_missing_node_is_none() {
    let cp = Checkpoint::new(JobId::new());
    assert!(cp.output_for(&NodeId::new("missing")).is_none());
}
