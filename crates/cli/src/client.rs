// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin client over the worker's IPC socket (§6): connects, sends one
//! `Request`, reads back one `Response`.

use std::path::Path;

use ajr_wire::{read_message, write_message, ProtocolError, Request, Response};
use thiserror::Error;
use tokio::net::UnixStream;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not connect to worker at {path}: {source}")]
    Connect { path: String, source: std::io::Error },

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("worker returned an error: {0}")]
    Server(String),

    #[error("unexpected response from worker")]
    UnexpectedResponse,
}

pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    pub async fn connect(socket_path: &Path) -> Result<Self, ClientError> {
        let stream = UnixStream::connect(socket_path)
            .await
            .map_err(|source| ClientError::Connect { path: socket_path.display().to_string(), source })?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, request: &Request) -> Result<Response, ClientError> {
        write_message(&mut self.stream, &ajr_wire::encode(request)?).await?;
        let bytes = read_message(&mut self.stream).await?;
        Ok(ajr_wire::decode(&bytes)?)
    }

    /// Unwraps `Response::Error` into `ClientError::Server`; leaves every
    /// other variant for the caller to match.
    pub async fn send_checked(&mut self, request: &Request) -> Result<Response, ClientError> {
        match self.send(request).await? {
            Response::Error { message } => Err(ClientError::Server(message)),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
