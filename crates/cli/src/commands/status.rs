// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr status` - worker health snapshot

use anyhow::Result;
use ajr_wire::{Request, Response};

use crate::client::DaemonClient;
use crate::output::{print_or_json, OutputFormat};

pub async fn handle(client: &mut DaemonClient, format: OutputFormat) -> Result<()> {
    let health = match client.send_checked(&Request::Status).await? {
        Response::Status { health } => health,
        _ => anyhow::bail!("worker returned an unexpected response to status"),
    };
    print_or_json(&health, format, |health| {
        format!(
            "jobs_running={} jobs_waiting={} leases_reclaimed={} last_reclaim_ms={}{}",
            health.jobs_running,
            health.jobs_waiting,
            health.leases_reclaimed,
            health.last_reclaim_ms,
            health.last_error.as_ref().map(|e| format!(" last_error={e:?}")).unwrap_or_default(),
        )
    })
}
