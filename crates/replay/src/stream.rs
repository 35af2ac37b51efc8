//! The paced replay loop: row in, encoded frame out, fixed sleep between.

use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::{info, warn};

use dashcast_wire::{Schema, WireError, encode_row};

use crate::sink::FrameSink;
use crate::source::CsvReplay;

/// Cadence of the reference producer: one frame per 60 Hz tick.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// What to do with a row the encoder rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Stop the run on the first bad row.
    Abort,
    /// Log the row index and error, then continue with the next row.
    Skip,
}

/// Outcome counters for one replay pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames handed to the sink.
    pub sent: u64,
    /// Rows dropped under [`RowErrorPolicy::Skip`].
    pub skipped: u64,
}

/// Drives rows from a capture through the encoder into a sink, pausing a
/// fixed interval between frames to mimic the live producer's tick.
///
/// The loop is sequential and single-tasked: each row is fully encoded and
/// handed off before the next is touched, and the pacing sleep is the only
/// suspension point. The streamer holds no state across rows beyond the
/// outcome counters.
pub struct Streamer {
    schema: Schema,
    interval: Duration,
    on_row_error: RowErrorPolicy,
}

impl Streamer {
    /// Streamer with the 60 Hz default cadence and abort-on-error policy.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            interval: DEFAULT_FRAME_INTERVAL,
            on_row_error: RowErrorPolicy::Abort,
        }
    }

    /// Replace the inter-frame interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replace the bad-row policy.
    pub fn with_row_error_policy(mut self, policy: RowErrorPolicy) -> Self {
        self.on_row_error = policy;
        self
    }

    /// Replay every row of `source` into `sink`, in order, paced.
    ///
    /// # Errors
    /// Sink failures always abort. Encoding failures abort or skip per the
    /// configured policy, except [`WireError::FrameLengthInvariant`], which
    /// signals an internally inconsistent encoder and aborts regardless.
    pub async fn run(&self, source: &CsvReplay, sink: &mut dyn FrameSink) -> Result<StreamStats> {
        let mut stats = StreamStats::default();

        for (index, row) in source.rows().enumerate() {
            match encode_row(&self.schema, &row) {
                Ok(frame) => {
                    sink.send(&frame).await?;
                    stats.sent = stats.sent.saturating_add(1);
                }
                Err(err @ WireError::FrameLengthInvariant { .. }) => {
                    // Not a data problem; the encoder itself is broken.
                    return Err(anyhow!(err).context(format!("row {index}: encoder defect")));
                }
                Err(err) => match self.on_row_error {
                    RowErrorPolicy::Abort => {
                        return Err(anyhow!(err).context(format!("row {index} failed to encode")));
                    }
                    RowErrorPolicy::Skip => {
                        warn!(row = index, error = %err, "skipping row that failed to encode");
                        stats.skipped = stats.skipped.saturating_add(1);
                    }
                },
            }
            tokio::time::sleep(self.interval).await;
        }

        info!(sent = stats.sent, skipped = stats.skipped, "replay pass finished");
        Ok(stats)
    }
}
