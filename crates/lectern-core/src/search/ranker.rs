// HybridRanker - fuses embedding similarity with BM25 over one corpus snapshot

use super::lexical::LexicalIndex;
use super::similarity::cosine_similarity;
use crate::chunk::{Chunk, ChunkId};
use crate::config::{LEXICAL_WEIGHT, MAX_CONTEXT_CHUNKS, SIMILARITY_WEIGHT};
use crate::error::SearchError;
use crate::provider::EmbeddingProvider;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One ranked result: the chunk id and its content, ready for context
/// assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedChunk {
    /// Chunk identifier
    pub id: ChunkId,
    /// Chunk text content
    pub content: String,
}

/// Ranks corpus chunks against a query by fused hybrid score.
///
/// Each call embeds the query once, builds a fresh lexical index over the
/// snapshot, and scores every chunk. No state is shared between calls, so
/// concurrent queries are independent.
pub struct HybridRanker {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl HybridRanker {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Ranks `corpus` against `query`, returning at most
    /// [`MAX_CONTEXT_CHUNKS`] chunks in descending fused-score order.
    ///
    /// Ties keep their snapshot order. An empty corpus yields an empty
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Provider`] when the embedding call fails;
    /// there is no lexical-only fallback and no partial result. A chunk
    /// whose stored embedding is absent, undecodable, or of the wrong
    /// dimension degrades to similarity 0 and ranking continues.
    #[instrument(skip_all, fields(corpus_size = corpus.len()))]
    pub async fn rank(
        &self,
        query: &str,
        corpus: &[Chunk],
    ) -> Result<Vec<RankedChunk>, SearchError> {
        let query_embedding = self.embedder.embed(query).await?;

        let index = LexicalIndex::build(corpus.iter().map(|c| (c.id, c.content.as_str())));

        let mut scored: Vec<(f32, &Chunk)> = corpus
            .iter()
            .map(|chunk| {
                let similarity = self.chunk_similarity(&query_embedding, chunk);
                let lexical = index.score(query, chunk.id);
                let fused = SIMILARITY_WEIGHT * similarity + LEXICAL_WEIGHT * lexical;
                (fused, chunk)
            })
            .collect();

        // sort_by is stable: equal fused scores keep snapshot order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(MAX_CONTEXT_CHUNKS);

        debug!(results = scored.len(), "ranking complete");

        Ok(scored
            .into_iter()
            .map(|(_, chunk)| RankedChunk {
                id: chunk.id,
                content: chunk.content.clone(),
            })
            .collect())
    }

    /// Similarity between the query embedding and one chunk's stored
    /// embedding, degrading to 0 on any per-chunk problem.
    fn chunk_similarity(&self, query_embedding: &[f32], chunk: &Chunk) -> f32 {
        let Some(embedding) = chunk.decoded_embedding() else {
            return 0.0;
        };
        match cosine_similarity(query_embedding, &embedding) {
            Ok(sim) => sim,
            Err(err) => {
                warn!(chunk = %chunk.id, %err, "stored embedding unusable, similarity set to 0");
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_chunk, StaticEmbedder};
    use crate::error::ProviderError;

    fn ranker_with_query_vector(v: Vec<f32>) -> HybridRanker {
        HybridRanker::new(Arc::new(StaticEmbedder::new(v)))
    }

    #[tokio::test]
    async fn test_empty_corpus_returns_empty_list() {
        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("anything", &[]).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_semantic_match_outranks_lexical_mismatch() {
        let corpus = vec![
            make_chunk(1, "unrelated words entirely", Some(&[1.0, 0.0])),
            make_chunk(2, "also unrelated content", Some(&[0.0, 1.0])),
        ];

        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("missing term", &corpus).await.unwrap();

        assert_eq!(results[0].id.as_u64(), 1);
    }

    #[tokio::test]
    async fn test_lexical_match_breaks_semantic_tie() {
        let corpus = vec![
            make_chunk(1, "nothing relevant here", Some(&[1.0, 0.0])),
            make_chunk(2, "recursion explained simply", Some(&[1.0, 0.0])),
        ];

        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("recursion", &corpus).await.unwrap();

        assert_eq!(results[0].id.as_u64(), 2);
    }

    #[tokio::test]
    async fn test_truncates_to_five_results() {
        let corpus: Vec<_> = (1..=8)
            .map(|i| make_chunk(i, "shared topic text", Some(&[1.0, 0.0])))
            .collect();

        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("topic", &corpus).await.unwrap();

        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn test_ties_keep_snapshot_order() {
        // Identical content and embeddings: every fused score is equal.
        let corpus: Vec<_> = [30u64, 10, 20, 40]
            .iter()
            .map(|&i| make_chunk(i, "same text", Some(&[0.5, 0.5])))
            .collect();

        let ranker = ranker_with_query_vector(vec![0.5, 0.5]);
        let results = ranker.rank("same", &corpus).await.unwrap();

        let ids: Vec<u64> = results.iter().map(|r| r.id.as_u64()).collect();
        assert_eq!(ids, vec![30, 10, 20, 40]);
    }

    #[tokio::test]
    async fn test_malformed_embedding_degrades_to_lexical_only() {
        let mut broken = make_chunk(1, "exact query words", None);
        broken.embedding = Some("not valid json".to_string());
        let corpus = vec![
            broken,
            make_chunk(2, "different terms", Some(&[0.0, 1.0])),
        ];

        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        // Does not error; the broken chunk still ranks via its BM25 score.
        let results = ranker.rank("exact query words", &corpus).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_u64(), 1);
    }

    #[tokio::test]
    async fn test_wrong_dimension_embedding_degrades_to_zero() {
        let corpus = vec![
            make_chunk(1, "alpha", Some(&[1.0, 0.0, 0.0])),
            make_chunk(2, "beta", Some(&[1.0, 0.0])),
        ];

        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("", &corpus).await.unwrap();

        // Chunk 1's 3-dimensional embedding cannot be compared to the
        // 2-dimensional query; chunk 2 wins on similarity alone.
        assert_eq!(results[0].id.as_u64(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_ranking() {
        let ranker = HybridRanker::new(Arc::new(crate::test_utils::FailingEmbedder));
        let corpus = vec![make_chunk(1, "text", Some(&[1.0, 0.0]))];

        let err = ranker.rank("query", &corpus).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::Provider(ProviderError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_results_carry_id_and_content_only() {
        let corpus = vec![make_chunk(7, "the content body", Some(&[1.0, 0.0]))];
        let ranker = ranker_with_query_vector(vec![1.0, 0.0]);
        let results = ranker.rank("content", &corpus).await.unwrap();

        assert_eq!(
            results[0],
            RankedChunk {
                id: ChunkId::from_u64(7),
                content: "the content body".to_string(),
            }
        );
    }
}
