//! TextRank over a sentence similarity graph
//!
//! Power iteration with the un-normalized TextRank update
//!
//! ```text
//! new(i) = (1 - d) + d * Σ_j [ w(i,j) / Σ_k w(j,k) ] * score(j)
//! ```
//!
//! Scores start at `1 / N`. Iteration stops once the L1 delta between two
//! rounds drops below the epsilon, or at the iteration cap. Hitting the cap
//! is not an error: the last scores are returned with `converged = false`.
//! A sentence with no neighbors settles at `1 - d`.

use super::RankOutput;
use crate::graph::{CsrGraph, SimilarityGraphBuilder};
use crate::summarizer::vectorizer::SparseVector;

/// TextRank sentence ranker
#[derive(Debug, Clone, PartialEq)]
pub struct TextRankRanker {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 delta
    pub epsilon: f64,
    /// Build similarity rows on the rayon pool
    pub parallel: bool,
}

impl Default for TextRankRanker {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
            parallel: false,
        }
    }
}

impl TextRankRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the similarity graph for `vectors` and rank it.
    pub fn rank(&self, vectors: &[SparseVector]) -> RankOutput {
        let graph = SimilarityGraphBuilder::new()
            .with_parallel(self.parallel)
            .build(vectors);
        self.run(&graph)
    }

    /// Run the iteration on a prepared graph.
    pub fn run(&self, graph: &CsrGraph) -> RankOutput {
        let n = graph.num_nodes;
        if n == 0 {
            return RankOutput::new(vec![], 0, 0.0, true);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];
        let restart = 1.0 - self.damping;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= self.epsilon {
            iterations += 1;

            new_scores.fill(restart);

            // Push each node's score to its neighbors, split by edge weight
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);
                if total_weight > 0.0 {
                    let share = self.damping * node_score / total_weight;
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] += share * weight;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        #[cfg(feature = "tracing")]
        if delta >= self.epsilon {
            tracing::debug!(
                iterations,
                delta,
                "textrank stopped at iteration cap before converging"
            );
        }

        RankOutput::new(scores, iterations, delta, delta < self.epsilon)
    }
}
