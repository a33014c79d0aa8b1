//! Index command: build a corpus snapshot from raw content items.

use crate::config;
use crate::embed::{LocalHashEmbedder, LOCAL_EMBEDDING_DIM};
use crate::snapshot::{write_snapshot, CorpusSnapshot};
use anyhow::{anyhow, Context, Result};
use lectern_core::chunk::{encode_embedding, Chunk, ChunkId};
use lectern_core::provider::EmbeddingProvider;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// One raw content item from the input file.
#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    content: String,
    moduletype: String,
    moduleid: u64,
}

/// Summary of a completed index run.
#[derive(Debug)]
pub struct IndexSummary {
    pub path: PathBuf,
    pub chunk_count: usize,
}

/// Reads raw items, embeds their content, and writes the snapshot.
pub async fn run(input: &Path, corpus: Option<&Path>) -> Result<IndexSummary> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let items: Vec<RawItem> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", input.display()))?;

    if items.iter().any(|item| item.id == 0) {
        return Err(anyhow!("content item id 0 is reserved and cannot be indexed"));
    }

    info!(items = items.len(), "embedding content items");
    let embedder = LocalHashEmbedder::new(LOCAL_EMBEDDING_DIM);
    let texts: Vec<String> = items.iter().map(|item| item.content.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let now = unix_now();
    let chunks: Vec<Chunk> = items
        .into_iter()
        .zip(embeddings)
        .map(|(item, embedding)| Chunk {
            id: ChunkId::from_u64(item.id),
            contenthash: content_hash(&item.content),
            content: item.content,
            embedding: Some(encode_embedding(&embedding)),
            moduletype: item.moduletype,
            moduleid: item.moduleid,
            timecreated: now,
            timemodified: now,
        })
        .collect();

    let path = config::snapshot_path(corpus)?;
    let snapshot = CorpusSnapshot::new(LOCAL_EMBEDDING_DIM, chunks);
    write_snapshot(&path, &snapshot)?;

    info!(chunks = snapshot.chunks.len(), path = %path.display(), "snapshot written");
    Ok(IndexSummary {
        path,
        chunk_count: snapshot.chunks.len(),
    })
}

/// SHA-256 hex digest of chunk content, for change detection on re-index.
fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)
}

/// Current Unix timestamp in seconds; 0 if the clock is before the epoch.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
