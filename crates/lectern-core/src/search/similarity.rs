//! Cosine similarity between embedding vectors.

use crate::error::SearchError;

/// Cosine similarity of two equal-length vectors: `dot(a,b) / (|a| * |b|)`.
///
/// Fails fast with [`SearchError::DimensionMismatch`] when the lengths
/// differ. Returns exactly `0.0` when either vector has zero norm: a
/// degenerate-similarity convention that avoids a division error, not a
/// true cosine value.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SearchError> {
    if a.len() != b.len() {
        return Err(SearchError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}
