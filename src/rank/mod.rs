//! Sentence ranking strategies
//!
//! [`Ranker`] is a tagged enum over the two strategies, so the chunk
//! coordinator dispatches statically and a new strategy is a compile error
//! until every match handles it.

pub mod textrank;
pub mod tfidf;

use crate::config::{Algorithm, SummarizerConfig};
use crate::summarizer::vectorizer::SparseVector;

pub use textrank::TextRankRanker;
pub use tfidf::TfidfRanker;

/// Result of ranking one chunk
#[derive(Debug, Clone, PartialEq)]
pub struct RankOutput {
    /// One score per sentence, indexed by local position in the chunk
    pub scores: Vec<f64>,
    /// Number of iterations performed (0 for single-pass rankers)
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the ranker converged
    pub converged: bool,
}

impl RankOutput {
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a sentence
    pub fn score(&self, local: usize) -> f64 {
        self.scores.get(local).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// The selected ranking strategy with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Ranker {
    TextRank(TextRankRanker),
    TfIdf(TfidfRanker),
}

impl Ranker {
    /// Build the ranker named by `cfg.algorithm`.
    pub fn from_config(cfg: &SummarizerConfig) -> Self {
        match cfg.algorithm {
            Algorithm::TextRank => Self::TextRank(
                TextRankRanker::new()
                    .with_damping(cfg.damping)
                    .with_epsilon(cfg.convergence_epsilon)
                    .with_max_iterations(cfg.max_iterations)
                    .with_parallel(cfg.parallel),
            ),
            Algorithm::TfIdf => Self::TfIdf(TfidfRanker),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::TextRank(_) => Algorithm::TextRank,
            Self::TfIdf(_) => Algorithm::TfIdf,
        }
    }

    /// Score every sentence of one chunk from its vectors.
    pub fn rank(&self, vectors: &[SparseVector]) -> RankOutput {
        match self {
            Self::TextRank(ranker) => ranker.rank(vectors),
            Self::TfIdf(ranker) => ranker.rank(vectors),
        }
    }
}
