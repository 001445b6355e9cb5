//! TF-IDF sentence vectors and document keywords
//!
//! Sentence vectors are sparse: sorted `(term, weight)` pairs, so dot
//! products are a linear merge and iteration order is fixed.

use rustc_hash::FxHashMap;

use crate::types::{Keyword, Sentence, TermId, Vocabulary};

/// Smoothed inverse sentence frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// Never zero, so a term present in every sentence still counts.
pub fn smoothed_idf(num_sentences: usize, sentence_freq: usize) -> f64 {
    ((1.0 + num_sentences as f64) / (1.0 + sentence_freq as f64)).ln() + 1.0
}

/// A sparse TF-IDF vector for one sentence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    /// Non-zero dimensions sorted by term id
    pub entries: Vec<(TermId, f64)>,
    /// L2 norm of the vector
    pub norm: f64,
}

impl SparseVector {
    /// Create from unsorted `(term, weight)` pairs; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(t, _)| t);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { entries, norm }
    }

    /// Dot product via merge of the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Cosine similarity, defined as 0 when either vector has zero norm
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        (self.dot(other) / (self.norm * other.norm)).clamp(0.0, 1.0)
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }
}

/// Count term occurrences in a sentence, keyed by term.
fn term_counts(sentence: &Sentence) -> FxHashMap<TermId, usize> {
    let mut counts = FxHashMap::default();
    for &term in &sentence.terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Build one TF-IDF vector per sentence. IDF is computed over `sentences`
/// only (one chunk), which keeps memory bounded by the chunk.
pub fn build_vectors(sentences: &[Sentence]) -> Vec<SparseVector> {
    let counts: Vec<FxHashMap<TermId, usize>> = sentences.iter().map(term_counts).collect();

    let mut sentence_freq: FxHashMap<TermId, usize> = FxHashMap::default();
    for sentence_counts in &counts {
        for &term in sentence_counts.keys() {
            *sentence_freq.entry(term).or_insert(0) += 1;
        }
    }

    let n = sentences.len();
    counts
        .into_iter()
        .map(|sentence_counts| {
            let entries = sentence_counts
                .into_iter()
                .map(|(term, tf)| (term, tf as f64 * smoothed_idf(n, sentence_freq[&term])))
                .collect();
            SparseVector::from_entries(entries)
        })
        .collect()
}

struct TermStats {
    frequency: usize,
    sentence_freq: usize,
    first_seen: usize,
    last_sentence: usize,
}

/// Top document keywords by total frequency × inverse sentence frequency.
///
/// Computed over the whole document, independent of chunking. Terms shorter
/// than `min_chars` characters are skipped. Equal weights keep the term that
/// occurs first.
pub fn corpus_keywords(
    sentences: &[Sentence],
    vocabulary: &Vocabulary,
    top_n: usize,
    min_chars: usize,
) -> Vec<Keyword> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut stats: FxHashMap<TermId, TermStats> = FxHashMap::default();
    let mut position = 0;
    for sentence in sentences {
        for &term in &sentence.terms {
            let entry = stats.entry(term).or_insert(TermStats {
                frequency: 0,
                sentence_freq: 0,
                first_seen: position,
                last_sentence: usize::MAX,
            });
            entry.frequency += 1;
            if entry.last_sentence != sentence.index {
                entry.sentence_freq += 1;
                entry.last_sentence = sentence.index;
            }
            position += 1;
        }
    }

    let n = sentences.len();
    let mut scored: Vec<(TermId, f64, usize)> = stats
        .into_iter()
        .filter(|(term, _)| vocabulary.term(*term).chars().count() >= min_chars)
        .map(|(term, s)| {
            let weight = s.frequency as f64 * smoothed_idf(n, s.sentence_freq);
            (term, weight, s.first_seen)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));
    scored.truncate(top_n);

    scored
        .into_iter()
        .map(|(term, weight, _)| Keyword::new(vocabulary.term(term), weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(index: usize, terms: &[TermId]) -> Sentence {
        Sentence {
            span: 0..0,
            char_len: terms.len(),
            index,
            terms: terms.to_vec(),
        }
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let v1 = SparseVector::from_entries(vec![(0, 1.0), (1, 2.0)]);
        let v2 = SparseVector::from_entries(vec![(1, 2.0), (0, 1.0)]);

        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let v1 = SparseVector::from_entries(vec![(0, 1.0)]);
        let v2 = SparseVector::from_entries(vec![(1, 1.0)]);

        assert!(v1.cosine_similarity(&v2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_norm_similarity_is_zero() {
        let v1 = SparseVector::default();
        let v2 = SparseVector::from_entries(vec![(0, 1.0)]);

        assert!(v1.is_zero());
        assert_eq!(v1.cosine_similarity(&v2), 0.0);
        assert_eq!(v1.cosine_similarity(&v1), 0.0);
    }

    #[test]
    fn test_build_vectors_tf_idf() {
        // term 0 in both sentences, term 1 twice in the first only
        let sentences = vec![sentence(0, &[0, 1, 1]), sentence(1, &[0])];
        let vectors = build_vectors(&sentences);

        let shared_idf = smoothed_idf(2, 2);
        let rare_idf = smoothed_idf(2, 1);
        assert!((shared_idf - 1.0).abs() < 1e-12);
        assert!(rare_idf > shared_idf);

        assert_eq!(vectors[0].entries, vec![(0, shared_idf), (1, 2.0 * rare_idf)]);
        assert_eq!(vectors[1].entries, vec![(0, shared_idf)]);
        assert!((vectors[0].total_weight() - (shared_idf + 2.0 * rare_idf)).abs() < 1e-12);
    }

    #[test]
    fn test_build_vectors_empty_sentence() {
        let sentences = vec![sentence(0, &[]), sentence(1, &[3])];
        let vectors = build_vectors(&sentences);
        assert!(vectors[0].is_zero());
        assert!(!vectors[1].is_zero());
    }

    #[test]
    fn test_keywords_rank_and_tie_break() {
        let mut vocab = Vocabulary::new();
        let market = vocab.intern("集市");
        let book = vocab.intern("看书");
        let chat = vocab.intern("聊天");
        let single = vocab.intern("甲");

        let sentences = vec![
            sentence(0, &[single, market]),
            sentence(1, &[book]),
            sentence(2, &[market, chat]),
        ];

        let keywords = corpus_keywords(&sentences, &vocab, 10, 2);
        let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();

        // "甲" is too short; "看书" and "聊天" tie, "看书" occurs first
        assert_eq!(terms, vec!["集市", "看书", "聊天"]);
        assert!(keywords[0].weight > keywords[1].weight);
        assert_eq!(keywords[1].weight, keywords[2].weight);
    }

    #[test]
    fn test_keywords_top_n() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern("春天");
        let b = vocab.intern("花朵");
        let sentences = vec![sentence(0, &[a, b, a])];

        assert_eq!(corpus_keywords(&sentences, &vocab, 1, 1).len(), 1);
        assert!(corpus_keywords(&sentences, &vocab, 0, 1).is_empty());
    }
}
