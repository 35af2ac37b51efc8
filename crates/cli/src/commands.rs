//! Subcommand implementations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use dashcast_replay::{CsvReplay, RowErrorPolicy, StreamStats, Streamer, UdpSink};
use dashcast_wire::{FieldSpec, Schema, WireError, encode_row};

/// The port CarDash dashboards conventionally listen on.
const DEFAULT_TARGET: &str = "127.0.0.1:5300";

#[derive(Args)]
pub struct StreamArgs {
    /// Capture file to replay (header line, then one sample row per tick)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination host:port for the datagrams
    #[arg(short, long, default_value = DEFAULT_TARGET, env = "DASHCAST_TARGET")]
    pub target: SocketAddr,

    /// Frames per second
    #[arg(long, default_value_t = 60.0)]
    pub rate_hz: f64,

    /// Skip rows that fail to encode instead of aborting the run
    #[arg(long)]
    pub skip_bad_rows: bool,

    /// Restart from the top of the capture when it is exhausted
    #[arg(long)]
    pub repeat: bool,
}

pub async fn stream(args: StreamArgs) -> Result<()> {
    ensure!(args.rate_hz > 0.0, "--rate-hz must be positive");

    let schema = Schema::car_dash()?;
    let source = CsvReplay::open(&args.input)?;
    if args.repeat {
        ensure!(!source.is_empty(), "capture has no rows to repeat");
    }
    let mut sink = UdpSink::connect(args.target).await?;

    let policy = if args.skip_bad_rows {
        RowErrorPolicy::Skip
    } else {
        RowErrorPolicy::Abort
    };
    let streamer = Streamer::new(schema)
        .with_interval(Duration::from_secs_f64(1.0 / args.rate_hz))
        .with_row_error_policy(policy);

    info!(
        input = %args.input.display(),
        target = %args.target,
        rows = source.len(),
        rate_hz = args.rate_hz,
        "starting replay"
    );

    let mut total = StreamStats::default();
    loop {
        let stats = streamer.run(&source, &mut sink).await?;
        total.sent = total.sent.saturating_add(stats.sent);
        total.skipped = total.skipped.saturating_add(stats.skipped);
        if !args.repeat {
            break;
        }
    }

    println!(
        "Sent {} frames to {} ({} rows skipped)",
        total.sent, args.target, total.skipped
    );
    Ok(())
}

#[derive(Args)]
pub struct PackArgs {
    /// Capture file to encode
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file of concatenated wire frames
    #[arg(short, long)]
    pub output: PathBuf,

    /// Skip rows that fail to encode instead of aborting
    #[arg(long)]
    pub skip_bad_rows: bool,
}

pub fn pack(args: PackArgs) -> Result<()> {
    let schema = Schema::car_dash()?;
    let source = CsvReplay::open(&args.input)?;
    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);

    let mut written = 0u64;
    let mut skipped = 0u64;
    for (index, row) in source.rows().enumerate() {
        match encode_row(&schema, &row) {
            Ok(frame) => {
                out.write_all(&frame)?;
                written = written.saturating_add(1);
            }
            Err(err @ WireError::FrameLengthInvariant { .. }) => {
                return Err(anyhow!(err).context(format!("row {index}: encoder defect")));
            }
            Err(err) if args.skip_bad_rows => {
                warn!(row = index, error = %err, "skipping row that failed to encode");
                skipped = skipped.saturating_add(1);
            }
            Err(err) => {
                return Err(anyhow!(err).context(format!("row {index} failed to encode")));
            }
        }
    }
    out.flush()?;

    println!(
        "Packed {} frames into {} ({} rows skipped)",
        written,
        args.output.display(),
        skipped
    );
    Ok(())
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Output in JSON format for machine parsing
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FieldRow {
    index: usize,
    offset: usize,
    width: usize,
    #[serde(flatten)]
    spec: FieldSpec,
}

pub fn schema(args: SchemaArgs) -> Result<()> {
    let schema = Schema::car_dash()?;

    let mut rows = Vec::with_capacity(schema.len());
    let mut offset = 0usize;
    for (index, spec) in schema.fields().iter().enumerate() {
        rows.push(FieldRow {
            index,
            offset,
            width: spec.ty.width(),
            spec: *spec,
        });
        offset = offset.saturating_add(spec.ty.width());
    }

    if args.json {
        let doc = serde_json::json!({
            "frame_len": schema.total_len(),
            "fields": rows,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{:>5}  {:>6}  {:>5}  {:<6}  name", "index", "offset", "width", "type");
        for row in &rows {
            println!(
                "{:>5}  {:>6}  {:>5}  {:<6}  {}",
                row.index,
                row.offset,
                row.width,
                row.spec.ty.tag(),
                row.spec.name
            );
        }
        println!("frame length: {} bytes", schema.total_len());
    }
    Ok(())
}
