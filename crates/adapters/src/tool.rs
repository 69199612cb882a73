// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool registry contract (§6). A tool is named, self-describing, and
//! invoked with opaque JSON arguments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("tool error: {0}")]
    ToolFailed(String),
    #[error("canceled")]
    Canceled,
}

/// Per-invocation context threaded through to a tool. Carries nothing the
/// core needs to inspect today; exists so adapters can add fields (tenant,
/// deadline) without changing the `Tool` trait's signature.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub tenant_id: Option<String>,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    async fn invoke(&self, ctx: &ToolContext, args: serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

#[async_trait]
pub trait ToolRegistry: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<dyn Tool>>;
    fn list(&self) -> Vec<Arc<dyn Tool>>;
}

/// In-memory registry keyed by tool name. Backs both production wiring
/// (registering real tools at startup) and tests (registering fakes).
#[derive(Default, Clone)]
pub struct StaticToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl StaticToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }
}

impl ToolRegistry for StaticToolRegistry {
    fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct EchoTool {
    pub name: String,
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "echoes its arguments back as the result"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object" })
    }

    async fn invoke(&self, _ctx: &ToolContext, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        Ok(args)
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
