//! BM25 lexical index over a corpus snapshot.
//!
//! The index is derived, disposable state: corpus size, average document
//! length, per-document lengths, and an inverted token → per-document term
//! frequency map. It is built fresh whenever the corpus changes; there is
//! no incremental maintenance.

use crate::chunk::ChunkId;
use crate::config::{BM25_B, BM25_K1};
use std::collections::{HashMap, HashSet};

/// Splits text into word tokens.
///
/// Word boundaries are non-alphanumeric characters. Case is preserved and
/// nothing is stemmed: "Apple" and "apple" are distinct terms.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Inverted index with BM25 scoring.
///
/// Construction is O(total corpus tokens); scoring one document is
/// O(distinct query tokens). Callers that rank large corpora repeatedly
/// should bound corpus size or cache upstream; the index itself assumes a
/// fresh snapshot per query.
pub struct LexicalIndex {
    /// Number of indexed documents
    doc_count: usize,
    /// Arithmetic mean of all document lengths
    avg_doc_len: f32,
    /// Word count per document
    doc_lens: HashMap<ChunkId, usize>,
    /// token → document id → term frequency
    term_freqs: HashMap<String, HashMap<ChunkId, usize>>,
}

impl LexicalIndex {
    /// Builds the index from `(id, text)` document pairs.
    pub fn build<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = (ChunkId, &'a str)>,
    {
        let mut doc_lens = HashMap::new();
        let mut term_freqs: HashMap<String, HashMap<ChunkId, usize>> = HashMap::new();
        let mut total_len = 0usize;

        for (id, text) in docs {
            let mut len = 0usize;
            for token in tokenize(text) {
                *term_freqs
                    .entry(token.to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0) += 1;
                len += 1;
            }
            total_len += len;
            doc_lens.insert(id, len);
        }

        let doc_count = doc_lens.len();
        let avg_doc_len = if doc_count == 0 {
            0.0
        } else {
            total_len as f32 / doc_count as f32
        };

        Self {
            doc_count,
            avg_doc_len,
            doc_lens,
            term_freqs,
        }
    }

    /// BM25 score of `query` against the indexed document `id`.
    ///
    /// Each distinct query token contributes once. The idf is
    /// `ln((N - n + 0.5) / (n + 0.5) + 1)`; the `+1` keeps it non-negative
    /// even for terms present in every document. Documents with no matching
    /// terms score 0, as does any id the index has never seen.
    pub fn score(&self, query: &str, id: ChunkId) -> f32 {
        let len = match self.doc_lens.get(&id) {
            Some(&len) => len as f32,
            None => return 0.0,
        };

        let distinct: HashSet<&str> = tokenize(query).collect();
        let mut score = 0.0f32;

        for token in distinct {
            let postings = self.term_freqs.get(token);
            let f = postings
                .and_then(|p| p.get(&id))
                .copied()
                .unwrap_or(0) as f32;
            if f == 0.0 {
                // Zero term frequency always nets to zero, whatever the idf.
                continue;
            }

            let n = postings.map_or(0, HashMap::len) as f32;
            let idf = ((self.doc_count as f32 - n + 0.5) / (n + 0.5) + 1.0).ln();
            let norm = BM25_K1 * (1.0 - BM25_B + BM25_B * (len / self.avg_doc_len));
            score += idf * (f * (BM25_K1 + 1.0)) / (f + norm);
        }

        score
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.doc_count
    }

    /// Returns `true` if no documents have been indexed.
    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }

    /// Returns the average document length in words.
    pub fn avg_doc_len(&self) -> f32 {
        self.avg_doc_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ChunkId {
        ChunkId::from_u64(raw)
    }

    fn two_doc_index() -> LexicalIndex {
        LexicalIndex::build([(id(1), "apple banana"), (id(2), "apple apple cherry")])
    }

    #[test]
    fn test_average_length_is_arithmetic_mean() {
        let index = two_doc_index();
        assert_eq!(index.len(), 2);
        assert!((index.avg_doc_len() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_known_score_value() {
        // doc 1: f("apple")=1, len=2, N=2, n=2, avg=2.5
        // idf = ln((2-2+0.5)/(2+0.5)+1) = ln(1.2)
        // norm = 1.2*(1-0.75+0.75*(2/2.5)) = 1.02
        // score = ln(1.2) * (1*2.2)/(1+1.02)
        let index = two_doc_index();
        let expected = 1.2f32.ln() * 2.2 / 2.02;
        assert!((index.score("apple", id(1)) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_higher_term_frequency_scores_higher() {
        let index = two_doc_index();
        assert!(index.score("apple", id(2)) > 0.0);
        // doc 2 has "apple" twice but is also longer; repeat frequency wins
        // here because saturation hasn't flattened it yet.
        assert!(index.score("apple", id(2)) > index.score("apple", id(1)));
    }

    #[test]
    fn test_rarer_term_outweighs_common_term() {
        let index = LexicalIndex::build([
            (id(1), "rust memory safety"),
            (id(2), "rust tooling"),
            (id(3), "rust async"),
        ]);
        // "memory" appears in one document, "rust" in all three.
        assert!(index.score("memory", id(1)) > index.score("rust", id(1)));
    }

    #[test]
    fn test_idf_positive_for_ubiquitous_term() {
        // The +1 smoothing keeps scores positive even when every document
        // contains the term.
        let index = LexicalIndex::build([(id(1), "shared"), (id(2), "shared")]);
        assert!(index.score("shared", id(1)) > 0.0);
    }

    #[test]
    fn test_duplicate_query_tokens_count_once() {
        let index = two_doc_index();
        assert_eq!(index.score("apple apple", id(1)), index.score("apple", id(1)));
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let index = two_doc_index();
        assert_eq!(index.score("", id(1)), 0.0);
        assert_eq!(index.score("   \t", id(1)), 0.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let index = two_doc_index();
        assert_eq!(index.score("durian", id(1)), 0.0);
        assert_eq!(index.score("durian", id(2)), 0.0);
    }

    #[test]
    fn test_unknown_document_scores_zero() {
        let index = two_doc_index();
        assert_eq!(index.score("apple", id(99)), 0.0);
    }

    #[test]
    fn test_single_document_corpus() {
        let index = LexicalIndex::build([(id(1), "one two three")]);
        assert_eq!(index.len(), 1);
        assert!((index.avg_doc_len() - 3.0).abs() < f32::EPSILON);
        assert!(index.score("two", id(1)) > 0.0);
    }

    #[test]
    fn test_tokenization_is_case_sensitive() {
        let index = LexicalIndex::build([(id(1), "Apple pie")]);
        assert_eq!(index.score("apple", id(1)), 0.0);
        assert!(index.score("Apple", id(1)) > 0.0);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let index = LexicalIndex::build([(id(1), "hello, world! foo-bar")]);
        assert!(index.score("world", id(1)) > 0.0);
        assert!(index.score("foo", id(1)) > 0.0);
        assert!(index.score("bar", id(1)) > 0.0);
    }

    #[test]
    fn test_empty_index() {
        let index = LexicalIndex::build(std::iter::empty::<(ChunkId, &str)>());
        assert!(index.is_empty());
        assert_eq!(index.score("anything", id(1)), 0.0);
    }
}
