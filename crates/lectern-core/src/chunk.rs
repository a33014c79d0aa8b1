//! Chunk data model and the stored-embedding codec.
//!
//! A chunk is the smallest indexed unit of course content. Chunks are
//! created and updated by an external ingestion process whenever source
//! content changes (detected via `contenthash`); the ranker only ever reads
//! them. One ranking call operates on a full in-memory snapshot of chunks
//! that is never mutated mid-query.

use serde::{Deserialize, Serialize};

/// Unique, stable chunk identifier.
///
/// Id `0` is reserved: it marks an unresolved citation reference and is
/// never assigned to a stored chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(u64);

impl ChunkId {
    /// Creates a ChunkId from a raw u64 value.
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value of this id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of indexed course content.
///
/// The embedding is kept in its stored form (a JSON array string) and only
/// decoded during ranking; an absent or undecodable payload degrades that
/// chunk to lexical-only scoring instead of failing the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk identifier
    pub id: ChunkId,
    /// UTF-8 text content
    pub content: String,
    /// Stored embedding payload (JSON array of floats), if any
    pub embedding: Option<String>,
    /// Type of the owning content item (e.g. "page", "resource")
    pub moduletype: String,
    /// Id of the owning content item
    pub moduleid: u64,
    /// SHA-256 hex digest of `content`, used by ingestion for change detection
    pub contenthash: String,
    /// Unix timestamp when the chunk was first created
    pub timecreated: u64,
    /// Unix timestamp of the last content update
    pub timemodified: u64,
}

impl Chunk {
    /// Decodes the stored embedding payload.
    ///
    /// Returns `None` when the payload is absent or not a valid JSON array
    /// of numbers. Callers treat `None` as "no semantic signal", never as an
    /// error.
    pub fn decoded_embedding(&self) -> Option<Vec<f32>> {
        self.embedding.as_deref().and_then(decode_embedding)
    }
}

/// Title and navigation target of the content item that owns a chunk.
///
/// Produced by [`ChunkStore::resolve_owner`](crate::store::ChunkStore::resolve_owner).
/// A missing `view_url` leaves a citation unresolved even when the title is
/// known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentOwner {
    /// Human-readable title of the owning content item
    pub title: String,
    /// URL at which the content item can be viewed
    pub view_url: Option<String>,
}

/// Encodes an embedding vector into its stored JSON form.
pub fn encode_embedding(values: &[f32]) -> String {
    // Vec<f32> serialization cannot fail; the fallback keeps the signature
    // infallible without unwrap.
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a stored embedding payload.
///
/// Returns `None` on any parse failure. serde_json emits the shortest
/// round-trippable representation for floats, so encode → decode reproduces
/// the original vector exactly.
pub fn decode_embedding(raw: &str) -> Option<Vec<f32>> {
    serde_json::from_str(raw).ok()
}
