//! Sentence similarity graph construction
//!
//! Pairwise cosine similarity computed through an inverted term index: a
//! sentence is only compared with sentences that share at least one term.
//! Each pair is computed once (upper triangle) and mirrored, so the graph is
//! exactly symmetric.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::csr::CsrGraph;
use crate::summarizer::vectorizer::SparseVector;
use crate::types::TermId;

/// Builds a [`CsrGraph`] of cosine similarities between sentence vectors
#[derive(Debug, Clone, Copy)]
pub struct SimilarityGraphBuilder {
    parallel: bool,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityGraphBuilder {
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Compute rows on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the similarity graph. Zero-norm vectors become isolated nodes.
    pub fn build(&self, vectors: &[SparseVector]) -> CsrGraph {
        let n = vectors.len();
        if n == 0 {
            return CsrGraph::default();
        }

        // term -> (sentence, weight), ascending by sentence
        let mut postings: FxHashMap<TermId, Vec<(u32, f64)>> = FxHashMap::default();
        for (i, vector) in vectors.iter().enumerate() {
            for &(term, weight) in &vector.entries {
                postings.entry(term).or_default().push((i as u32, weight));
            }
        }

        let row = |i: usize| upper_row(i, vectors, &postings);
        let upper: Vec<Vec<(u32, f64)>> = if self.parallel && n >= 256 {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };

        CsrGraph::from_upper_rows(n, &upper)
    }
}

/// Similarities between sentence `i` and every later sentence sharing a term.
fn upper_row(
    i: usize,
    vectors: &[SparseVector],
    postings: &FxHashMap<TermId, Vec<(u32, f64)>>,
) -> Vec<(u32, f64)> {
    let vector = &vectors[i];
    if vector.is_zero() {
        return Vec::new();
    }

    let mut dots: FxHashMap<u32, f64> = FxHashMap::default();
    for &(term, weight) in &vector.entries {
        let list = &postings[&term];
        let after = list.partition_point(|&(j, _)| j as usize <= i);
        for &(j, other_weight) in &list[after..] {
            *dots.entry(j).or_insert(0.0) += weight * other_weight;
        }
    }

    let mut row: Vec<(u32, f64)> = dots
        .into_iter()
        .filter_map(|(j, dot)| {
            let similarity = (dot / (vector.norm * vectors[j as usize].norm)).clamp(0.0, 1.0);
            (similarity > 0.0).then_some((j, similarity))
        })
        .collect();
    row.sort_unstable_by_key(|&(j, _)| j);
    row
}
