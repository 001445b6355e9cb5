//! Frequency-based sentence ranking
//!
//! A sentence scores the sum of its TF-IDF weights. One pass, no graph, no
//! convergence.

use super::RankOutput;
use crate::summarizer::vectorizer::SparseVector;

/// TF-IDF sum ranker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TfidfRanker;

impl TfidfRanker {
    pub fn rank(&self, vectors: &[SparseVector]) -> RankOutput {
        let scores = vectors.iter().map(SparseVector::total_weight).collect();
        RankOutput::new(scores, 0, 0.0, true)
    }
}
