//! Deterministic local embedding provider.
//!
//! Produces fixed-dimension vectors by hashing terms into buckets and
//! weighting by term frequency. Nowhere near as semantically rich as a
//! neural model, but dependency-free and deterministic: as long as the
//! snapshot and the query are embedded by the same instance configuration,
//! they live in one vector space.

use lectern_core::error::ProviderError;
use lectern_core::provider::EmbeddingProvider;

/// Vector dimensionality used by the CLI.
pub const LOCAL_EMBEDDING_DIM: usize = 256;

/// Hashed term-frequency embedder.
pub struct LocalHashEmbedder {
    dimensions: usize,
}

impl LocalHashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hashes a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Tokenizes text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Builds the L2-normalized term-frequency vector for a text.
    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let total = tokens.len() as f32;
        for token in &tokens {
            let bucket = Self::hash_term(token, self.dimensions);
            vec[bucket] += 1.0 / total;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }

        vec
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for LocalHashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
