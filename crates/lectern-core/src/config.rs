//! Scoring constants.
//!
//! These values define the production ranking behavior. They are fixed at
//! compile time rather than configurable: the fusion weights and BM25
//! parameters were tuned together, and changing one without re-tuning the
//! others degrades ranking quality.

/// BM25 term-frequency saturation parameter.
pub const BM25_K1: f32 = 1.2;

/// BM25 document-length normalization parameter.
pub const BM25_B: f32 = 0.75;

/// Weight of the cosine-similarity component in the fused score.
///
/// Semantic similarity dominates lexical overlap roughly 2:1. A chunk that
/// is topically close to the query outranks one that merely repeats its
/// words.
pub const SIMILARITY_WEIGHT: f32 = 0.7;

/// Weight of the BM25 component in the fused score.
pub const LEXICAL_WEIGHT: f32 = 0.3;

/// Maximum number of chunks returned by a ranking call.
///
/// Bounds the context block handed to the generation provider.
pub const MAX_CONTEXT_CHUNKS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_weights_sum_to_one() {
        assert!((SIMILARITY_WEIGHT + LEXICAL_WEIGHT - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bm25_parameters_in_conventional_range() {
        assert!(BM25_K1 >= 1.0 && BM25_K1 <= 2.0);
        assert!(BM25_B > 0.0 && BM25_B < 1.0);
    }
}
