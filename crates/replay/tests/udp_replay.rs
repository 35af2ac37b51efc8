//! End-to-end replay: capture file in, paced UDP datagrams out.

use std::io::Write;
use std::time::Duration;

use dashcast_replay::{CsvReplay, RowErrorPolicy, StreamStats, Streamer, UdpSink};
use dashcast_wire::{CAR_DASH_FIELD_COUNT, CAR_DASH_FRAME_LEN, Schema};
use tokio::net::UdpSocket;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_capture(rows: &[String]) -> Result<(tempfile::TempDir, std::path::PathBuf), std::io::Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lap.csv");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "header")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok((dir, path))
}

fn sample_row(timestamp_ms: u32) -> String {
    let mut cols = vec!["0".to_string(); CAR_DASH_FIELD_COUNT];
    if let Some(slot) = cols.get_mut(1) {
        *slot = timestamp_ms.to_string();
    }
    cols.join(",")
}

#[tokio::test]
async fn capture_replays_as_fixed_length_datagrams() -> TestResult {
    let rows = vec![sample_row(0), sample_row(16), sample_row(33)];
    let (_dir, path) = write_capture(&rows)?;

    let receiver = UdpSocket::bind("127.0.0.1:0").await?;
    let target = receiver.local_addr()?;

    let source = CsvReplay::open(&path)?;
    let mut sink = UdpSink::connect(target).await?;
    let stats = Streamer::new(Schema::car_dash()?)
        .with_interval(Duration::ZERO)
        .run(&source, &mut sink)
        .await?;
    assert_eq!(stats, StreamStats { sent: 3, skipped: 0 });

    let mut buf = [0u8; 512];
    for expected_ts in [0u32, 16, 33] {
        let len = tokio::time::timeout(Duration::from_secs(5), receiver.recv(&mut buf)).await??;
        assert_eq!(len, CAR_DASH_FRAME_LEN);
        let ts_bytes = buf.get(4..8).ok_or("short datagram")?;
        assert_eq!(u32::from_le_bytes(ts_bytes.try_into()?), expected_ts);
    }
    Ok(())
}

#[tokio::test]
async fn malformed_rows_are_skipped_on_the_wire() -> TestResult {
    let rows = vec![sample_row(1), "garbage,row".to_string(), sample_row(2)];
    let (_dir, path) = write_capture(&rows)?;

    let receiver = UdpSocket::bind("127.0.0.1:0").await?;
    let target = receiver.local_addr()?;

    let source = CsvReplay::open(&path)?;
    let mut sink = UdpSink::connect(target).await?;
    let stats = Streamer::new(Schema::car_dash()?)
        .with_interval(Duration::ZERO)
        .with_row_error_policy(RowErrorPolicy::Skip)
        .run(&source, &mut sink)
        .await?;
    assert_eq!(stats, StreamStats { sent: 2, skipped: 1 });

    let mut buf = [0u8; 512];
    for expected_ts in [1u32, 2] {
        let len = tokio::time::timeout(Duration::from_secs(5), receiver.recv(&mut buf)).await??;
        assert_eq!(len, CAR_DASH_FRAME_LEN);
        let ts_bytes = buf.get(4..8).ok_or("short datagram")?;
        assert_eq!(u32::from_le_bytes(ts_bytes.try_into()?), expected_ts);
    }
    Ok(())
}
