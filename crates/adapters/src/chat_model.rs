// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat model capability contract (§6). Message and tool-schema content is
//! opaque JSON; the core never inspects prompt text.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatModelError {
    #[error("rate limited")]
    RateLimited,
    #[error("provider error: {0}")]
    ProviderError(String),
    #[error("canceled")]
    Canceled,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(
        &self,
        messages: serde_json::Value,
        tool_schemas: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ChatModelError>;
}

/// Echoes the input messages back as the reply. Deterministic, so it is
/// useful both for tests and as a conservative default before a real
/// provider is wired in.
pub struct EchoChatModel;

#[async_trait]
impl ChatModel for EchoChatModel {
    async fn invoke(
        &self,
        messages: serde_json::Value,
        _tool_schemas: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ChatModelError> {
        Ok(serde_json::json!({ "role": "assistant", "echo": messages }))
    }
}

#[cfg(test)]
#[path = "chat_model_tests.rs"]
mod tests;
