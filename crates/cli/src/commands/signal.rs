// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr signal` - resume a waiting job

use anyhow::Result;
use ajr_wire::{Request, Response};
use clap::Args;

use crate::client::DaemonClient;

#[derive(Args)]
pub struct SignalArgs {
    /// Job currently waiting on a signal
    pub job_id: String,

    /// Correlation key the job is waiting on
    pub correlation_key: String,

    /// JSON payload delivered to the job, e.g. '{"approved": true}'
    #[arg(long)]
    pub payload: Option<String>,
}

pub async fn handle(args: SignalArgs, client: &mut DaemonClient) -> Result<()> {
    let payload = args.payload.map(|raw| serde_json::from_str(&raw)).transpose()?;
    let request =
        Request::Signal { job_id: args.job_id.into(), correlation_key: args.correlation_key, payload };
    match client.send(&request).await? {
        Response::Ok => println!("signal delivered"),
        Response::SignalMismatch => anyhow::bail!("job is waiting on a different correlation key"),
        Response::NotWaiting => anyhow::bail!("job is not currently waiting"),
        Response::Error { message } => anyhow::bail!("{message}"),
        _ => anyhow::bail!("worker returned an unexpected response to signal"),
    }
    Ok(())
}
