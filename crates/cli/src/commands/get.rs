// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr get` - fetch a single job's current projection

use anyhow::Result;
use ajr_wire::{Request, Response};
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{format_job, print_or_json, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    pub job_id: String,
}

pub async fn handle(args: GetArgs, client: &mut DaemonClient, format: OutputFormat) -> Result<()> {
    let job = match client.send_checked(&Request::GetJob { job_id: args.job_id.into() }).await? {
        Response::Job { job } => job,
        _ => anyhow::bail!("worker returned an unexpected response to get"),
    };
    print_or_json(&job, format, |job| match job {
        Some(job) => format_job(job),
        None => "job not found".to_string(),
    })
}
