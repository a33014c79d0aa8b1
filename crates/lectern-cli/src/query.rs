//! Query command: rank a corpus snapshot against query text.

use crate::config;
use crate::embed::LocalHashEmbedder;
use crate::snapshot::read_snapshot;
use anyhow::{Context, Result};
use lectern_core::search::{HybridRanker, RankedChunk};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads the snapshot and ranks it against the query.
///
/// The embedder is constructed with the snapshot's recorded dimensionality
/// so query vectors land in the same space the corpus was embedded in.
pub async fn run(query: &str, corpus: Option<&Path>) -> Result<Vec<RankedChunk>> {
    let path = config::snapshot_path(corpus)?;
    let snapshot = read_snapshot(&path)?;
    info!(
        chunks = snapshot.chunks.len(),
        dimensions = snapshot.dimensions,
        "snapshot loaded"
    );

    let ranker = HybridRanker::new(Arc::new(LocalHashEmbedder::new(snapshot.dimensions)));
    let results = ranker
        .rank(query, &snapshot.chunks)
        .await
        .context("ranking failed")?;

    info!(results = results.len(), "query ranked");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_snapshot_is_a_clear_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("query", Some(&dir.path().join("absent.json")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("lectern index"));
    }

    #[tokio::test]
    async fn test_end_to_end_against_indexed_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("content.json");
        let corpus = dir.path().join("corpus.json");
        std::fs::write(
            &input,
            r#"[
                {"id": 1, "content": "photosynthesis converts light into chemical energy", "moduletype": "page", "moduleid": 1},
                {"id": 2, "content": "the french revolution began in 1789", "moduletype": "page", "moduleid": 2}
            ]"#,
        )
        .unwrap();
        crate::index::run(&input, Some(&corpus)).await.unwrap();

        let results = run("photosynthesis light energy", Some(&corpus)).await.unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].id.as_u64(), 1);
    }
}
