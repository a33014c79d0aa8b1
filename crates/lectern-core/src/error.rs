//! Error types for lectern-core.
//!
//! Failures are split by domain so callers can branch on the variant rather
//! than inspecting message strings: provider failures (upstream HTTP APIs),
//! store failures (the persistence collaborator), and search failures (the
//! ranking surface that wraps both).

use thiserror::Error;

/// Errors surfaced by external embedding or generation providers.
///
/// These are never retried internally and never produce a partial result:
/// a provider failure aborts the operation that needed it.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider unreachable: connection refused, DNS failure, timeout
    #[error("provider transport failure: {0}")]
    Transport(String),
    /// Provider reachable but returned a non-success status
    #[error("provider returned {status}: {message}")]
    Status {
        /// HTTP status code from the provider
        status: u16,
        /// Provider-supplied error message, if any
        message: String,
    },
    /// Response received but its payload did not match the expected shape
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),
    /// Response was well-formed but carried no usable result
    #[error("provider returned an empty result")]
    Empty,
}

/// Errors from the chunk store collaborator.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// Underlying I/O failure
    #[error("store I/O error: {0}")]
    Io(String),
    /// Stored data could not be serialized or deserialized
    #[error("store serialization error: {0}")]
    Serialization(String),
}

/// Errors from ranking and the query pipeline.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// An external provider call failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// A chunk store call failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Two vectors of different dimensionality were compared
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the left-hand vector
        expected: usize,
        /// Dimension of the right-hand vector
        actual: usize,
    },
}
