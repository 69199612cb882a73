// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ajr_wire::{read_request, write_response};
use tempfile::tempdir;
use tokio::net::UnixListener;

#[tokio::test]
async fn send_round_trips_a_ping() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("ajrd.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await.unwrap();
        assert!(matches!(request, Request::Ping));
        write_response(&mut stream, &Response::Pong).await.unwrap();
    });

    let mut client = DaemonClient::connect(&socket_path).await.unwrap();
    let response = client.send(&Request::Ping).await.unwrap();
    assert_eq!(response, Response::Pong);

    server.await.unwrap();
}

#[tokio::test]
async fn send_checked_surfaces_server_errors() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("ajrd.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _request = read_request(&mut stream).await.unwrap();
        write_response(&mut stream, &Response::Error { message: "boom".into() }).await.unwrap();
    });

    let mut client = DaemonClient::connect(&socket_path).await.unwrap();
    let err = client.send_checked(&Request::Ping).await.unwrap_err();
    assert!(matches!(err, ClientError::Server(message) if message == "boom"));

    server.await.unwrap();
}

#[tokio::test]
async fn connect_fails_cleanly_when_no_worker_is_listening() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("missing.sock");
    let err = DaemonClient::connect(&socket_path).await.unwrap_err();
    assert!(matches!(err, ClientError::Connect { .. }));
}
