// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn park_then_lookup_returns_the_job_id() {
    let index = WakeupIndex::new();
    let key = ParkKey::new(TenantId::new("acme"), "bot", CorrelationKey::new("order-1"));
    let job_id = JobId::new();
    index.park(key.clone(), job_id);
    assert_eq!(index.lookup(&key), Some(job_id));
}

#[test]
fn unpark_job_removes_it_regardless_of_key() {
    let index = WakeupIndex::new();
    let key = ParkKey::new(TenantId::new("acme"), "bot", CorrelationKey::new("order-1"));
    let job_id = JobId::new();
    index.park(key.clone(), job_id);
    index.unpark_job(job_id);
    assert_eq!(index.lookup(&key), None);
}

#[tokio::test]
async fn notify_ready_wakes_a_receiver_with_the_job_id() {
    let index = WakeupIndex::new();
    let mut rx = index.subscribe();
    let job_id = JobId::new();
    index.notify_ready(job_id);
    let got = WakeupIndex::receive(&mut rx, Duration::from_millis(100)).await;
    assert_eq!(got, Some(job_id));
}

#[tokio::test]
async fn receive_times_out_with_no_notification() {
    let index = WakeupIndex::new();
    let mut rx = index.subscribe();
    let got = WakeupIndex::receive(&mut rx, Duration::from_millis(20)).await;
    assert_eq!(got, None);
}
