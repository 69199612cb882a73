// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ajr_core::Job;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print any serializable value, either pretty JSON or via the given text
/// formatter.
pub fn print_or_json<T: Serialize>(value: &T, format: OutputFormat, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

pub fn format_job(job: &Job) -> String {
    format!(
        "{} [{}] agent={} goal={:?} retry_count={}{}",
        job.id,
        job.status,
        job.agent_id,
        job.goal,
        job.retry_count,
        job.cancel_requested_at.map(|_| " cancel_requested").unwrap_or_default(),
    )
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
