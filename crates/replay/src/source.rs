//! Comma-delimited capture files as an ordered row source.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A loaded telemetry capture: one header line (dropped), then one
/// comma-separated sample row per simulation tick, in tick order.
///
/// The source does no numeric validation; splitting is purely positional and
/// the encoder owns all coercion. Rows are borrowed out of the loaded text,
/// so a capture can be replayed any number of times without re-reading.
#[derive(Debug, Clone)]
pub struct CsvReplay {
    lines: Vec<String>,
}

impl CsvReplay {
    /// Load a capture file from disk.
    ///
    /// # Errors
    /// I/O failures (missing file, permissions, non-UTF-8 content) with the
    /// offending path in the error chain.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read capture file {}", path.display()))?;
        Ok(Self::from_text(&raw))
    }

    /// Build a source from already-loaded capture text.
    pub fn from_text(raw: &str) -> Self {
        let lines = raw
            .lines()
            .skip(1) // header
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Number of sample rows (the header does not count).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the capture holds no sample rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate the rows in tick order, each split into positional columns.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.lines.iter().map(|line| line.split(',').collect())
    }
}
