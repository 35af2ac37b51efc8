//! dashcast - CarDash telemetry replay CLI
//!
//! Encodes recorded telemetry captures into the fixed 311-byte CarDash wire
//! frame and streams them as paced UDP datagrams, so a dashboard or decoder
//! can be exercised without the game running.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{PackArgs, SchemaArgs, StreamArgs};

#[derive(Parser)]
#[command(name = "dashcast")]
#[command(about = "CarDash telemetry encoder and replay streamer")]
#[command(version)]
struct Cli {
    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a capture file as paced UDP datagrams
    Stream(StreamArgs),

    /// Encode a capture file into concatenated wire frames on disk
    Pack(PackArgs),

    /// Print the wire schema (field order, types, offsets)
    Schema(SchemaArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Stream(args) => commands::stream(args).await,
        Commands::Pack(args) => commands::pack(args),
        Commands::Schema(args) => commands::schema(args),
    }
}
