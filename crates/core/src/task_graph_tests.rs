// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn node(id: &str, kind: NodeKind) -> Node {
    Node::new(id, kind, serde_json::json!({}))
}

#[test]
fn linear_graph_topo_order_matches_edges() {
    let graph = TaskGraph::new(
        vec![node("validate", NodeKind::Tool), node("format", NodeKind::Llm)],
        vec![(NodeId::new("validate"), NodeId::new("format"))],
        NodeId::new("validate"),
        NodeId::new("format"),
    )
    .unwrap();

    let order = graph.topological_order().unwrap();
    assert_eq!(order, vec![NodeId::new("validate"), NodeId::new("format")]);
}

#[test]
fn ties_break_lexicographically_by_node_id() {
    // b and a both become ready simultaneously after start completes.
    let graph = TaskGraph::new(
        vec![
            node("start", NodeKind::Tool),
            node("b", NodeKind::Tool),
            node("a", NodeKind::Tool),
            node("end", NodeKind::Tool),
        ],
        vec![
            (NodeId::new("start"), NodeId::new("b")),
            (NodeId::new("start"), NodeId::new("a")),
            (NodeId::new("a"), NodeId::new("end")),
            (NodeId::new("b"), NodeId::new("end")),
        ],
        NodeId::new("start"),
        NodeId::new("end"),
    )
    .unwrap();

    let order = graph.topological_order().unwrap();
    assert_eq!(
        order,
        vec![NodeId::new("start"), NodeId::new("a"), NodeId::new("b"), NodeId::new("end")]
    );
}

#[test]
fn cycle_is_rejected() {
    let nodes = vec![node("a", NodeKind::Tool), node("b", NodeKind::Tool)];
    let edges = vec![(NodeId::new("a"), NodeId::new("b")), (NodeId::new("b"), NodeId::new("a"))];
    let err = TaskGraph::new(nodes, edges, NodeId::new("a"), NodeId::new("b")).unwrap_err();
    assert_eq!(err, TaskGraphError::Cycle);
}

#[test]
fn duplicate_node_id_is_rejected() {
    let nodes = vec![node("a", NodeKind::Tool), node("a", NodeKind::Llm)];
    let err = TaskGraph::new(nodes, vec![], NodeId::new("a"), NodeId::new("a")).unwrap_err();
    assert_eq!(err, TaskGraphError::DuplicateNodeId(NodeId::new("a")));
}

#[test]
fn unreachable_node_is_rejected() {
    let nodes = vec![node("a", NodeKind::Tool), node("b", NodeKind::Tool), node("orphan", NodeKind::Tool)];
    let edges = vec![(NodeId::new("a"), NodeId::new("b"))];
    let err = TaskGraph::new(nodes, edges, NodeId::new("a"), NodeId::new("b")).unwrap_err();
    assert_eq!(err, TaskGraphError::Unreachable(NodeId::new("orphan")));
}

#[test]
fn canonical_json_is_deterministic_across_construction_order() {
    let g1 = TaskGraph::new(
        vec![node("validate", NodeKind::Tool), node("format", NodeKind::Llm)],
        vec![(NodeId::new("validate"), NodeId::new("format"))],
        NodeId::new("validate"),
        NodeId::new("format"),
    )
    .unwrap();
    let g2 = TaskGraph::new(
        vec![node("format", NodeKind::Llm), node("validate", NodeKind::Tool)],
        vec![(NodeId::new("validate"), NodeId::new("format"))],
        NodeId::new("validate"),
        NodeId::new("format"),
    )
    .unwrap();
    assert_eq!(g1.canonical_json(), g2.canonical_json());
    assert_eq!(g1.content_hash(), g2.content_hash());
}

#[test]
fn canonical_json_round_trips_to_an_identical_graph() {
    let graph = TaskGraph::new(
        vec![node("validate", NodeKind::Tool), node("format", NodeKind::Llm)],
        vec![(NodeId::new("validate"), NodeId::new("format"))],
        NodeId::new("validate"),
        NodeId::new("format"),
    )
    .unwrap();
    let json = graph.canonical_json();
    let parsed: TaskGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(graph, parsed);
    assert_eq!(graph.content_hash(), parsed.content_hash());
}

#[test]
fn nodes_after_cursor_skips_completed_prefix() {
    let graph = TaskGraph::new(
        vec![node("a", NodeKind::Tool), node("b", NodeKind::Tool), node("c", NodeKind::Tool)],
        vec![(NodeId::new("a"), NodeId::new("b")), (NodeId::new("b"), NodeId::new("c"))],
        NodeId::new("a"),
        NodeId::new("c"),
    )
    .unwrap();

    assert_eq!(graph.nodes_after(None).unwrap(), vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")]);
    assert_eq!(graph.nodes_after(Some(&NodeId::new("a"))).unwrap(), vec![NodeId::new("b"), NodeId::new("c")]);
    assert_eq!(graph.nodes_after(Some(&NodeId::new("c"))).unwrap(), Vec::<NodeId>::new());
}
