// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ajr_core::FakeClock;
use ajr_storage::InMemoryEventStore;
use ajr_wire::{read_message, write_message};
use tempfile::tempdir;
use tokio::net::UnixStream;

async fn send(stream: &mut UnixStream, request: &Request) -> Response {
    write_message(stream, &ajr_wire::encode(request).unwrap()).await.unwrap();
    let bytes = read_message(stream).await.unwrap();
    ajr_wire::decode(&bytes).unwrap()
}

#[tokio::test]
async fn ping_and_submit_round_trip_over_the_socket() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("ajrd.sock");

    let store = Arc::new(InMemoryEventStore::new());
    let wakeup = Arc::new(WakeupIndex::new());
    let health = HealthHandle::new();
    let server = Arc::new(IpcServer::new(store, wakeup, health, FakeClock::new()));

    let shutdown = CancellationToken::new();
    let serve_path = socket_path.clone();
    let serve_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        server.serve(&serve_path, serve_shutdown).await.unwrap();
    });

    // Give the listener a moment to bind.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut stream = UnixStream::connect(&socket_path).await.unwrap();
    assert_eq!(send(&mut stream, &Request::Ping).await, Response::Pong);

    let response = send(
        &mut stream,
        &Request::Submit {
            tenant_id: "acme".into(),
            agent_id: "bot".into(),
            goal: "reply".into(),
            required_capabilities: Default::default(),
            queue: String::new(),
        },
    )
    .await;
    let job_id = match response {
        Response::JobId { job_id } => job_id,
        other => panic!("expected JobId, got {other:?}"),
    };

    let response = send(&mut stream, &Request::GetJob { job_id }).await;
    assert!(matches!(response, Response::Job { job: Some(_) }));

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn signal_on_an_unknown_job_is_reported_as_not_waiting() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("ajrd.sock");

    let store = Arc::new(InMemoryEventStore::new());
    let wakeup = Arc::new(WakeupIndex::new());
    let health = HealthHandle::new();
    let server = Arc::new(IpcServer::new(store, wakeup, health, FakeClock::new()));

    let shutdown = CancellationToken::new();
    let serve_path = socket_path.clone();
    let serve_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        server.serve(&serve_path, serve_shutdown).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut stream = UnixStream::connect(&socket_path).await.unwrap();
    let response = send(
        &mut stream,
        &Request::Signal { job_id: ajr_core::JobId::new(), correlation_key: "k".into(), payload: None },
    )
    .await;
    assert!(matches!(response, Response::NotWaiting) || matches!(response, Response::Error { .. }));

    shutdown.cancel();
    let _ = handle.await;
}
