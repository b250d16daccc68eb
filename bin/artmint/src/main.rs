//! artmint: off-chain tooling for allowlist roots and payload objects.

#![allow(missing_docs, rustdoc::missing_crate_level_docs)]

mod allowlist;
mod payload;

use clap::{Parser, Subcommand};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "artmint", version, about = "Allowlist and payload tooling for artmint")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and check allowlist Merkle commitments
    #[command(subcommand)]
    Allowlist(allowlist::AllowlistCommand),
    /// Encode and decode payload objects
    #[command(subcommand)]
    Payload(payload::PayloadCommand),
}

/// Logs go to stderr so command output on stdout stays machine readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> eyre::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Allowlist(cmd) => cmd.execute(&mut stdout),
        Command::Payload(cmd) => cmd.execute(&mut stdout),
    }
}
