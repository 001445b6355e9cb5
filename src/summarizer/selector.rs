//! Ratio-based sentence selection for one chunk
//!
//! Picks the top `round(n × ratio)` sentences of a chunk by score (at least
//! one when the chunk is non-empty and the ratio is positive) and returns
//! them in document order.

use crate::rank::RankOutput;
use crate::summarizer::vectorizer::SparseVector;
use crate::types::Sentence;

/// Number of sentences to keep out of `n`.
///
/// `ratio <= 0` keeps none and `ratio >= 1` keeps all. Otherwise the count is
/// rounded and clamped to `1..=n`.
pub fn target_count(n: usize, ratio: f64) -> usize {
    if n == 0 || ratio.is_nan() || ratio <= 0.0 {
        return 0;
    }
    if ratio >= 1.0 {
        return n;
    }
    ((n as f64 * ratio).round() as usize).clamp(1, n)
}

/// Score-ordered sentence selector
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSelector {
    ratio: f64,
    min_sentence_chars: usize,
}

impl SentenceSelector {
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            min_sentence_chars: 0,
        }
    }

    /// Sentences shorter than this with no content terms are picked last.
    pub fn with_min_sentence_chars(mut self, min_sentence_chars: usize) -> Self {
        self.min_sentence_chars = min_sentence_chars;
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Select local indices, ascending.
    ///
    /// Order of preference: non-demoted before demoted, higher score first,
    /// lower index first. When every vector in the chunk is zero the scores
    /// carry no information and the first sentences are taken in order.
    pub fn select(
        &self,
        sentences: &[Sentence],
        vectors: &[SparseVector],
        rank: &RankOutput,
    ) -> Vec<usize> {
        let n = sentences.len();
        let k = target_count(n, self.ratio);
        if k == 0 {
            return Vec::new();
        }

        if vectors.iter().all(SparseVector::is_zero) {
            return (0..k).collect();
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            let demoted_a = sentences[a].is_demoted(self.min_sentence_chars);
            let demoted_b = sentences[b].is_demoted(self.min_sentence_chars);
            demoted_a
                .cmp(&demoted_b)
                .then(rank.score(b).total_cmp(&rank.score(a)))
                .then(a.cmp(&b))
        });

        let mut selected: Vec<usize> = order.into_iter().take(k).collect();
        selected.sort_unstable();
        selected
    }
}
