//! Replay pipeline for CarDash telemetry captures.
//!
//! Glue around the `dashcast-wire` encoder: [`CsvReplay`] supplies ordered
//! rows from a comma-delimited capture file, [`Streamer`] encodes each row
//! and paces the resulting frames onto a [`FrameSink`], and [`UdpSink`]
//! delivers every frame as one best-effort datagram. There is no flow
//! control and no retransmission; a consumer that misses a datagram missed
//! that tick.
#![deny(static_mut_refs)]

mod sink;
mod source;
mod stream;

pub use sink::{FrameSink, UdpSink};
pub use source::CsvReplay;
pub use stream::{DEFAULT_FRAME_INTERVAL, RowErrorPolicy, StreamStats, Streamer};
