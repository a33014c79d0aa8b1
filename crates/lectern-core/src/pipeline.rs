//! End-to-end query orchestration.
//!
//! One query runs a single synchronous pipeline: load the corpus snapshot,
//! rank it, assemble the top chunks into a numbered context block, ask the
//! generation provider for an answer, then resolve the chunk references in
//! that answer into citations.

use crate::citation::{parse_citations, Citation};
use crate::error::SearchError;
use crate::provider::{EmbeddingProvider, GenerationProvider};
use crate::search::{HybridRanker, RankedChunk};
use crate::store::ChunkStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// The final answer to a query: resolved citations plus token accounting.
#[derive(Debug, Clone, Default)]
pub struct RagAnswer {
    /// Citations resolved from the generated answer, in answer order
    pub citations: Vec<Citation>,
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced by the completion
    pub completion_tokens: u32,
    /// Total tokens for the generation call
    pub total_tokens: u32,
}

/// Orchestrates retrieval, generation, and citation resolution.
pub struct RagPipeline<S: ChunkStore> {
    generator: Arc<dyn GenerationProvider>,
    store: S,
    ranker: HybridRanker,
}

impl<S: ChunkStore> RagPipeline<S> {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        store: S,
    ) -> Self {
        Self {
            generator,
            store,
            ranker: HybridRanker::new(embedder),
        }
    }

    /// Answers a query against the stored corpus.
    ///
    /// When ranking selects no chunks (empty corpus), the generator is not
    /// called and an empty answer is returned.
    ///
    /// # Errors
    ///
    /// Provider failures (embedding or generation) and store failures
    /// propagate; unresolvable citation lines are silently dropped.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<RagAnswer, SearchError> {
        let corpus = self.store.load_corpus().await?;
        let ranked = self.ranker.rank(query, &corpus).await?;

        if ranked.is_empty() {
            info!("no rankable chunks, returning empty answer");
            return Ok(RagAnswer::default());
        }

        let prompt = build_prompt(query, &ranked);
        let completion = self.generator.generate(&prompt).await?;

        let citations = parse_citations(&completion.text, &self.store).await?;
        info!(
            context_chunks = ranked.len(),
            citations = citations.len(),
            total_tokens = completion.usage.total_tokens,
            "query answered"
        );

        Ok(RagAnswer {
            citations,
            prompt_tokens: completion.usage.prompt_tokens,
            completion_tokens: completion.usage.completion_tokens,
            total_tokens: completion.usage.total_tokens,
        })
    }
}

/// Renders the generation prompt from the ranked context chunks.
///
/// Every context line is prefixed with the chunk's bracketed id, and the
/// instructions require the model to start each answer line the same way.
/// [`parse_citations`] depends on that line shape; any change to this
/// template must keep the bracketed-id prefix contract intact.
fn build_prompt(query: &str, context: &[RankedChunk]) -> String {
    let mut prompt = String::from(
        "You are a course assistant. Answer the question using only the \
         numbered excerpts below. Begin every line of your answer with the \
         bracketed number of the excerpt it draws from, e.g. \"[12] ...\". \
         Do not invent excerpt numbers.\n\nExcerpts:\n",
    );
    for chunk in context {
        prompt.push_str(&format!("[{}] {}\n", chunk.id, chunk.content));
    }
    prompt.push_str(&format!("\nQuestion: {}\n", query));
    prompt
}
