// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sub-workflow registry contract (§6). A `workflow` node delegates to a
//! named, externally defined workflow and receives an opaque result back.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("workflow error: {0}")]
pub struct WorkflowError(pub String);

#[async_trait]
pub trait WorkflowRegistry: Send + Sync {
    async fn execute(&self, name: &str, params: serde_json::Value) -> Result<serde_json::Value, WorkflowError>;
}

/// Fails every execution. A safe default until real sub-workflows are wired
/// in: nodes of kind `workflow` surface a clear, classifiable error instead
/// of silently no-opping.
pub struct UnimplementedWorkflowRegistry;

#[async_trait]
impl WorkflowRegistry for UnimplementedWorkflowRegistry {
    async fn execute(&self, name: &str, _params: serde_json::Value) -> Result<serde_json::Value, WorkflowError> {
        Err(WorkflowError(format!("no workflow registered for '{name}'")))
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
