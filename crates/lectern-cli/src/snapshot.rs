//! Corpus snapshot file format.
//!
//! A snapshot is the CLI's stand-in for the chunk table: a versioned JSON
//! file holding every chunk with its embedding payload. The recorded
//! dimensionality lets the query side construct a matching embedder.

use anyhow::{anyhow, Context, Result};
use lectern_core::chunk::Chunk;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk corpus snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    /// Schema version of this file
    pub version: u32,
    /// Embedding dimensionality every chunk was embedded with
    pub dimensions: usize,
    /// All chunks in insertion order
    pub chunks: Vec<Chunk>,
}

impl CorpusSnapshot {
    pub fn new(dimensions: usize, chunks: Vec<Chunk>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            dimensions,
            chunks,
        }
    }
}

/// Writes a snapshot, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &CorpusSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

/// Reads and validates a snapshot.
pub fn read_snapshot(path: &Path) -> Result<CorpusSnapshot> {
    let data = std::fs::read_to_string(path).with_context(|| {
        format!(
            "no corpus snapshot at {} (run `lectern index` first)",
            path.display()
        )
    })?;

    let snapshot: CorpusSnapshot =
        serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(anyhow!(
            "snapshot version {} is not supported (expected {})",
            snapshot.version,
            SNAPSHOT_VERSION
        ));
    }

    Ok(snapshot)
}
