//! Traits for external embedding and generation providers.
//!
//! The engine depends only on these interfaces; concrete HTTP integrations
//! live with the consuming application. Implementations receive their
//! endpoint, credentials, and timeout through an explicit [`ProviderConfig`]
//! at construction time; there is no ambient/global configuration lookup.

use crate::error::ProviderError;
use std::time::Duration;

/// Produces fixed-dimension embedding vectors for text.
///
/// One deployment uses one embedding model, so `dimensions()` is constant
/// for the lifetime of an implementation. Implementations must bound their
/// requests by the configured timeout; on timeout or transport failure the
/// call fails as a whole, with no partial batches.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Embeds a batch of texts, one vector per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// Output dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;
}

/// Produces free-text completions for a prompt.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<Completion, ProviderError>;
}

/// Token accounting reported by a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced in the completion
    pub completion_tokens: u32,
    /// Sum of prompt and completion tokens
    pub total_tokens: u32,
}

/// A generation result: the raw answer text plus token accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw generated text
    pub text: String,
    /// Token usage for the call
    pub usage: TokenUsage,
}

/// Connection settings handed to a provider implementation at construction.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    pub endpoint: String,
    /// API credential; redacted from Debug output
    pub api_key: String,
    /// Model identifier to request
    pub model: String,
    /// Upper bound for a single provider request
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
