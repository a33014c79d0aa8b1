//! Chunk store trait and in-memory implementation.
//!
//! The store is the persistence collaborator: it owns the chunk table and
//! the mapping from a chunk's `moduletype`/`moduleid` to a displayable
//! content item. The engine only reads from it; ingestion (creating and
//! updating chunks) happens elsewhere.

use crate::chunk::{Chunk, ChunkId, ContentOwner};
use crate::error::StoreError;
use std::collections::HashMap;

/// Read-side interface over the chunk persistence layer.
///
/// `load_corpus` must return a consistent snapshot in a stable order: ties
/// in the fused ranking score are broken by snapshot position, so the order
/// chunks come back in is part of the contract.
#[async_trait::async_trait]
pub trait ChunkStore: Send + Sync {
    /// Returns the full corpus snapshot for one ranking operation.
    async fn load_corpus(&self) -> Result<Vec<Chunk>, StoreError>;

    /// Retrieves a chunk by id.
    ///
    /// Returns `Ok(None)` if the chunk doesn't exist.
    async fn get_chunk(&self, id: ChunkId) -> Result<Option<Chunk>, StoreError>;

    /// Maps a chunk's owning content item to its title and view URL.
    ///
    /// Returns `Ok(None)` if the owner is unknown.
    async fn resolve_owner(
        &self,
        moduletype: &str,
        moduleid: u64,
    ) -> Result<Option<ContentOwner>, StoreError>;
}

/// HashMap-backed store for tests and local tooling.
///
/// Preserves chunk insertion order in `load_corpus` so ranking ties behave
/// deterministically.
#[derive(Default)]
pub struct InMemoryChunkStore {
    chunks: Vec<Chunk>,
    by_id: HashMap<ChunkId, usize>,
    owners: HashMap<(String, u64), ContentOwner>,
}

impl InMemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a chunk, replacing any existing chunk with the same id.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        match self.by_id.get(&chunk.id) {
            Some(&pos) => self.chunks[pos] = chunk,
            None => {
                self.by_id.insert(chunk.id, self.chunks.len());
                self.chunks.push(chunk);
            }
        }
    }

    /// Registers the owning content item for a `moduletype`/`moduleid` pair.
    pub fn insert_owner(&mut self, moduletype: &str, moduleid: u64, owner: ContentOwner) {
        self.owners.insert((moduletype.to_string(), moduleid), owner);
    }

    /// Returns the number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if no chunks are stored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait::async_trait]
impl ChunkStore for InMemoryChunkStore {
    async fn load_corpus(&self) -> Result<Vec<Chunk>, StoreError> {
        Ok(self.chunks.clone())
    }

    async fn get_chunk(&self, id: ChunkId) -> Result<Option<Chunk>, StoreError> {
        Ok(self.by_id.get(&id).map(|&pos| self.chunks[pos].clone()))
    }

    async fn resolve_owner(
        &self,
        moduletype: &str,
        moduleid: u64,
    ) -> Result<Option<ContentOwner>, StoreError> {
        Ok(self
            .owners
            .get(&(moduletype.to_string(), moduleid))
            .cloned())
    }
}
