// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ajr`: the CLI client for a running `ajrd` worker (§6 external interfaces).

mod client;
mod color;
mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use client::DaemonClient;
use commands::{cancel::CancelArgs, get::GetArgs, signal::SignalArgs, submit::SubmitArgs};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "ajr", version, about = "Client for a running ajrd worker")]
struct Cli {
    /// Path to the worker's IPC socket
    #[arg(long, global = true, default_value = "/tmp/ajrd.sock")]
    socket: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new job
    Submit(SubmitArgs),
    /// Request cooperative cancellation of a job
    Cancel(CancelArgs),
    /// Resume a job waiting on a signal
    Signal(SignalArgs),
    /// Fetch a single job's current projection
    Get(GetArgs),
    /// Show the worker's health snapshot
    Status,
}

#[tokio::main]
async fn main() {
    use clap::{CommandFactory, FromArgMatches};
    let matches = Cli::command().styles(color::styles()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        let code = err.downcast_ref::<ExitError>().map(|e| e.code).unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut client = DaemonClient::connect(&cli.socket).await?;
    match cli.command {
        Command::Submit(args) => commands::submit::handle(args, &mut client, cli.format).await,
        Command::Cancel(args) => commands::cancel::handle(args, &mut client).await,
        Command::Signal(args) => commands::signal::handle(args, &mut client).await,
        Command::Get(args) => commands::get::handle(args, &mut client, cli.format).await,
        Command::Status => commands::status::handle(&mut client, cli.format).await,
    }
}
