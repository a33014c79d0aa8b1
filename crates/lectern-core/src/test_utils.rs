//! Shared helpers for unit tests. Only compiled when running tests.

use crate::chunk::{encode_embedding, Chunk, ChunkId};
use crate::error::ProviderError;
use crate::provider::EmbeddingProvider;

/// Builds a chunk with the given id, content, and optional embedding.
pub fn make_chunk(id: u64, content: &str, embedding: Option<&[f32]>) -> Chunk {
    Chunk {
        id: ChunkId::from_u64(id),
        content: content.to_string(),
        embedding: embedding.map(encode_embedding),
        moduletype: "page".to_string(),
        moduleid: id,
        contenthash: String::new(),
        timecreated: 0,
        timemodified: 0,
    }
}

/// Builds a chunk owned by a specific content item.
pub fn make_owned_chunk(id: u64, content: &str, moduletype: &str, moduleid: u64) -> Chunk {
    Chunk {
        moduletype: moduletype.to_string(),
        moduleid,
        ..make_chunk(id, content, None)
    }
}

/// Embedding provider that returns the same vector for every input.
pub struct StaticEmbedder {
    vector: Vec<f32>,
}

impl StaticEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.vector.clone())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|_| self.vector.clone()).collect())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// Embedding provider whose every call fails with a transport error.
pub struct FailingEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Err(ProviderError::Transport("connection refused".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Err(ProviderError::Transport("connection refused".to_string()))
    }

    fn dimensions(&self) -> usize {
        0
    }
}
