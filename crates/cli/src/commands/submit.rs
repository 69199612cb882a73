// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr submit` - create a new job

use std::collections::BTreeSet;

use anyhow::Result;
use ajr_wire::{Request, Response};
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{print_or_json, OutputFormat};

#[derive(Args)]
pub struct SubmitArgs {
    /// Tenant the job belongs to
    pub tenant_id: String,

    /// Agent that should run this job
    pub agent_id: String,

    /// Goal describing the job's objective
    pub goal: String,

    /// Capability the claiming worker must offer (repeatable)
    #[arg(long = "require")]
    pub required_capabilities: Vec<String>,

    /// Queue name, empty for the default queue
    #[arg(long, default_value = "")]
    pub queue: String,
}

pub async fn handle(args: SubmitArgs, client: &mut DaemonClient, format: OutputFormat) -> Result<()> {
    let request = Request::Submit {
        tenant_id: args.tenant_id,
        agent_id: args.agent_id,
        goal: args.goal,
        required_capabilities: args.required_capabilities.into_iter().collect::<BTreeSet<_>>(),
        queue: args.queue,
    };
    let job_id = match client.send_checked(&request).await? {
        Response::JobId { job_id } => job_id,
        _ => anyhow::bail!("worker returned an unexpected response to submit"),
    };
    print_or_json(&job_id, format, |id| format!("submitted {id}"))
}
