// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn registry_returns_registered_tool_by_name() {
    let mut registry = StaticToolRegistry::new();
    registry.register(Arc::new(EchoTool { name: "echo".into() }));

    let tool = registry.get("echo").expect("tool registered");
    let result = tool.invoke(&ToolContext::default(), serde_json::json!({"x": 1})).await.unwrap();
    assert_eq!(result, serde_json::json!({"x": 1}));
}

#[test]
fn unknown_tool_name_returns_none() {
    let registry = StaticToolRegistry::new();
    assert!(registry.get("missing").is_none());
}

#[test]
fn list_returns_all_registered_tools() {
    let mut registry = StaticToolRegistry::new();
    registry.register(Arc::new(EchoTool { name: "a".into() }));
    registry.register(Arc::new(EchoTool { name: "b".into() }));
    assert_eq!(registry.list().len(), 2);
}
