// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix domain socket listener serving the submit/cancel/signal/status
//! interfaces (§6) to the CLI over the `ajr-wire` framing.

use std::path::Path;
use std::sync::Arc;

use ajr_core::{Clock, CorrelationKey, JobConfig, StoreError, TenantId};
use ajr_engine::WakeupIndex;
use ajr_storage::EventStore;
use ajr_wire::{read_request, write_response, Request, Response};
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::health::HealthHandle;

pub struct IpcServer<C> {
    store: Arc<dyn EventStore>,
    wakeup: Arc<WakeupIndex>,
    health: HealthHandle,
    clock: C,
}

impl<C: Clock + 'static> IpcServer<C> {
    pub fn new(store: Arc<dyn EventStore>, wakeup: Arc<WakeupIndex>, health: HealthHandle, clock: C) -> Self {
        Self { store, wakeup, health, clock }
    }

    /// Bind `socket_path` and serve connections until `shutdown` fires.
    /// A stale socket file left behind by a crashed process is removed first.
    pub async fn serve(self: Arc<Self>, socket_path: &Path, shutdown: CancellationToken) -> std::io::Result<()> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)?;
        }
        let listener = UnixListener::bind(socket_path)?;
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, _) = accepted?;
                    let this = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(err) = this.handle_connection(stream).await {
                            debug!(error = %err, "ipc connection ended");
                        }
                    });
                }
                _ = shutdown.cancelled() => return Ok(()),
            }
        }
    }

    async fn handle_connection(&self, mut stream: UnixStream) -> Result<(), ajr_wire::ProtocolError> {
        loop {
            let request = match read_request(&mut stream).await {
                Ok(request) => request,
                Err(ajr_wire::ProtocolError::Io(err)) if err.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
                Err(err) => return Err(err),
            };
            let response = self.dispatch(request).await;
            write_response(&mut stream, &response).await?;
        }
    }

    async fn dispatch(&self, request: Request) -> Response {
        let now_ms = self.clock.epoch_ms();
        match request {
            Request::Ping => Response::Pong,
            Request::Status => Response::Status { health: self.health.snapshot() },
            Request::GetJob { job_id } => Response::Job { job: self.store.get_job(job_id).await.map(Box::new) },
            Request::Submit { tenant_id, agent_id, goal, required_capabilities, queue } => {
                let config = JobConfig::builder(TenantId::new(tenant_id), agent_id, goal)
                    .required_capabilities(required_capabilities)
                    .queue(queue)
                    .build();
                match self.store.submit(config, now_ms).await {
                    Ok(job_id) => {
                        self.wakeup.notify_ready(job_id);
                        Response::JobId { job_id }
                    }
                    Err(err) => Response::Error { message: err.to_string() },
                }
            }
            Request::Cancel { job_id } => match self.store.request_cancel(job_id, now_ms).await {
                Ok(()) => Response::Ok,
                Err(err) => Response::Error { message: err.to_string() },
            },
            Request::Signal { job_id, correlation_key, payload } => {
                match self.store.signal(job_id, CorrelationKey::new(correlation_key), payload, now_ms).await {
                    Ok(()) => {
                        self.wakeup.notify_ready(job_id);
                        Response::Ok
                    }
                    Err(StoreError::CorrelationMismatch { .. }) => Response::SignalMismatch,
                    Err(StoreError::NotWaiting { .. }) => Response::NotWaiting,
                    Err(err) => Response::Error { message: err.to_string() },
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "ipc_tests.rs"]
mod tests;
