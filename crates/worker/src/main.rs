// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajrd`: the worker process binary. Loads a `WorkerConfig`, wires the
//! default in-memory store and adapters, and runs the worker loop, inbox
//! poller, and IPC listener until interrupted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ajr_adapters::{EchoChatModel, FixedSingleNodePlanner, StaticToolRegistry, UnimplementedWorkflowRegistry};
use ajr_core::SystemClock;
use ajr_engine::{StepExecutor, WakeupIndex};
use ajr_storage::InMemoryEventStore;
use ajr_worker::{HealthHandle, InboxPoller, IpcServer, WorkerConfig, WorkerLoop};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ajrd", about = "Agent job execution runtime worker")]
struct Args {
    /// Path to a TOML config file. Defaults left in place when absent.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = match args.config {
        Some(path) => WorkerConfig::load(&path).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to load config, falling back to defaults");
            WorkerConfig::default()
        }),
        None => WorkerConfig::default(),
    };

    info!(worker_id = %config.worker_id, socket_path = %config.socket_path, "starting ajrd");

    let store: Arc<dyn ajr_storage::EventStore> = Arc::new(InMemoryEventStore::new());
    let wakeup = Arc::new(WakeupIndex::new());
    let health = HealthHandle::new();
    let clock = SystemClock;

    let executor = Arc::new(StepExecutor::new(
        store.clone(),
        FixedSingleNodePlanner,
        EchoChatModel,
        StaticToolRegistry::default(),
        UnimplementedWorkflowRegistry,
        clock.clone(),
    ));

    let shutdown = CancellationToken::new();

    let worker_loop = Arc::new(WorkerLoop::new(config.clone(), store.clone(), executor, wakeup.clone(), clock.clone(), health.clone()));
    let loop_handle = tokio::spawn(worker_loop.run(shutdown.clone()));

    let inbox_handle = config.inbox_poll.then(|| {
        let poller = InboxPoller::new(
            store.clone(),
            wakeup.clone(),
            clock.clone(),
            std::time::Duration::from_millis(config.inbox_poll_interval_ms),
        );
        tokio::spawn(poller.run(shutdown.clone()))
    });

    let ipc = Arc::new(IpcServer::new(store, wakeup, health, clock));
    let socket_path: PathBuf = Path::new(&config.socket_path).to_path_buf();
    let ipc_handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(err) = ipc.serve(&socket_path, shutdown).await {
                tracing::error!(error = %err, "ipc listener stopped");
            }
        })
    };

    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
    shutdown.cancel();

    let _ = loop_handle.await;
    if let Some(handle) = inbox_handle {
        let _ = handle.await;
    }
    let _ = ipc_handle.await;
}
