// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr cancel` - request cooperative cancellation of a job

use anyhow::Result;
use ajr_wire::{Request, Response};
use clap::Args;

use crate::client::DaemonClient;

#[derive(Args)]
pub struct CancelArgs {
    /// Job to cancel
    pub job_id: String,
}

pub async fn handle(args: CancelArgs, client: &mut DaemonClient) -> Result<()> {
    match client.send_checked(&Request::Cancel { job_id: args.job_id.into() }).await? {
        Response::Ok => {
            println!("cancel requested");
            Ok(())
        }
        _ => anyhow::bail!("worker returned an unexpected response to cancel"),
    }
}
