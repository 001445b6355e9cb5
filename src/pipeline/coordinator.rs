//! Chunk coordination: split, rank in parallel, merge.
//!
//! A chunk is a run of whole sentences bounded by a character budget and a
//! sentence budget. Chunks share nothing mutable: each builds its own vectors
//! and graph from the read-only [`Document`], so they can be ranked in any
//! order or concurrently and the merged result is the same.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::check_chunk_budgets;
use crate::error::ConfigError;
use crate::rank::{RankOutput, Ranker};
use crate::summarizer::vectorizer::build_vectors;
use crate::summarizer::SentenceSelector;
use crate::types::{Chunk, Document, Sentence};

/// Ranking and selection result for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkOutcome {
    pub chunk: Chunk,
    pub rank: RankOutput,
    /// Selected local indices, ascending
    pub selected: Vec<usize>,
    pub elapsed: Duration,
}

/// Splits a document into chunks and ranks them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkCoordinator {
    chunk_size_chars: usize,
    max_sentences_per_chunk: usize,
    parallel: bool,
}

impl ChunkCoordinator {
    /// Fails when either budget is zero.
    pub fn new(
        chunk_size_chars: usize,
        max_sentences_per_chunk: usize,
    ) -> Result<Self, ConfigError> {
        let mut report = ConfigError::default();
        check_chunk_budgets(chunk_size_chars, max_sentences_per_chunk, &mut report);
        if report.has_issues() {
            return Err(report);
        }
        Ok(Self {
            chunk_size_chars,
            max_sentences_per_chunk,
            parallel: true,
        })
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Partition sentences into consecutive chunks.
    ///
    /// A chunk closes before the sentence that would push it past either
    /// budget. A sentence longer than the character budget gets a chunk of its
    /// own; sentences are never split.
    pub fn split(&self, sentences: &[Sentence]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chars = 0;

        for (i, sentence) in sentences.iter().enumerate() {
            let count = i - start;
            let over_chars = chars + sentence.char_len > self.chunk_size_chars;
            let over_sentences = count + 1 > self.max_sentences_per_chunk;
            if count > 0 && (over_chars || over_sentences) {
                chunks.push(Chunk {
                    index: chunks.len(),
                    sentences: start..i,
                    char_count: chars,
                });
                start = i;
                chars = 0;
            }
            chars += sentence.char_len;
        }

        if start < sentences.len() {
            chunks.push(Chunk {
                index: chunks.len(),
                sentences: start..sentences.len(),
                char_count: chars,
            });
        }

        chunks
    }

    /// Rank and select every chunk of `document`, returned in chunk order.
    pub fn rank_chunks(
        &self,
        document: &Document,
        ranker: &Ranker,
        selector: &SentenceSelector,
    ) -> Vec<ChunkOutcome> {
        let chunks = document.chunks();
        let outcomes = if self.parallel && chunks.len() > 1 {
            chunks
                .par_iter()
                .map(|chunk| process_chunk(document, chunk, ranker, selector))
                .collect()
        } else {
            chunks
                .iter()
                .map(|chunk| process_chunk(document, chunk, ranker, selector))
                .collect()
        };

        merge(outcomes)
    }
}

/// Rank one chunk in isolation.
pub fn process_chunk(
    document: &Document,
    chunk: &Chunk,
    ranker: &Ranker,
    selector: &SentenceSelector,
) -> ChunkOutcome {
    let started = Instant::now();
    let sentences = document.chunk_sentences(chunk);
    let vectors = build_vectors(sentences);
    let rank = ranker.rank(&vectors);
    let selected = selector.select(sentences, &vectors, &rank);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        chunk = chunk.index,
        sentences = chunk.len(),
        selected = selected.len(),
        iterations = rank.iterations,
        "chunk ranked"
    );

    ChunkOutcome {
        chunk: chunk.clone(),
        rank,
        selected,
        elapsed: started.elapsed(),
    }
}

/// Order outcomes by chunk index, the single merge point.
pub fn merge(mut outcomes: Vec<ChunkOutcome>) -> Vec<ChunkOutcome> {
    outcomes.sort_by_key(|outcome| outcome.chunk.index);
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Algorithm, SummarizerConfig};
    use crate::types::Vocabulary;

    fn sentences(lens: &[usize]) -> Vec<Sentence> {
        lens.iter()
            .enumerate()
            .map(|(index, &char_len)| Sentence {
                span: 0..0,
                char_len,
                index,
                terms: vec![],
            })
            .collect()
    }

    fn ranges(chunks: &[Chunk]) -> Vec<std::ops::Range<usize>> {
        chunks.iter().map(|c| c.sentences.clone()).collect()
    }

    #[test]
    fn test_split_by_chars() {
        let coordinator = ChunkCoordinator::new(10, 100).unwrap();
        let chunks = coordinator.split(&sentences(&[4, 4, 4, 6, 1]));

        assert_eq!(ranges(&chunks), vec![0..2, 2..4, 4..5]);
        assert_eq!(chunks[0].char_count, 8);
        assert_eq!(chunks[1].char_count, 10);
    }

    #[test]
    fn test_split_exact_fit() {
        let coordinator = ChunkCoordinator::new(10, 100).unwrap();
        let chunks = coordinator.split(&sentences(&[5, 5, 5]));
        assert_eq!(ranges(&chunks), vec![0..2, 2..3]);
    }

    #[test]
    fn test_split_by_sentence_count() {
        let coordinator = ChunkCoordinator::new(1_000, 2).unwrap();
        let chunks = coordinator.split(&sentences(&[1, 1, 1, 1, 1]));
        assert_eq!(ranges(&chunks), vec![0..2, 2..4, 4..5]);
        assert!(chunks.iter().enumerate().all(|(i, c)| c.index == i));
    }

    #[test]
    fn test_oversize_sentence_gets_own_chunk() {
        let coordinator = ChunkCoordinator::new(10, 100).unwrap();
        let chunks = coordinator.split(&sentences(&[3, 50, 3]));
        assert_eq!(ranges(&chunks), vec![0..1, 1..2, 2..3]);
        assert_eq!(chunks[1].char_count, 50);
    }

    #[test]
    fn test_zero_budgets_rejected() {
        let report = ChunkCoordinator::new(0, 0).unwrap_err();
        assert!(report.issue("chunk_size_chars").is_some());
        assert!(report.issue("max_sentences_per_chunk").is_some());

        let report = ChunkCoordinator::new(10, 0).unwrap_err();
        assert_eq!(report.issues.len(), 1);
        assert!(ChunkCoordinator::new(1, 1).is_ok());
    }

    #[test]
    fn test_split_empty() {
        assert!(ChunkCoordinator::new(10, 10).unwrap().split(&[]).is_empty());
    }

    #[test]
    fn test_merge_orders_by_chunk_index() {
        let outcome = |index: usize| ChunkOutcome {
            chunk: Chunk {
                index,
                sentences: index..index + 1,
                char_count: 1,
            },
            rank: RankOutput::new(vec![1.0], 0, 0.0, true),
            selected: vec![0],
            elapsed: Duration::ZERO,
        };
        let merged = merge(vec![outcome(2), outcome(0), outcome(1)]);
        let order: Vec<usize> = merged.iter().map(|o| o.chunk.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    fn document(coordinator: &ChunkCoordinator) -> Document {
        // Overlapping terms so every chunk has a connected graph
        let mut text = String::new();
        let mut sents = Vec::new();
        for i in 0..40 {
            let start = text.len();
            text.push_str("句子。");
            sents.push(Sentence {
                span: start..text.len(),
                char_len: 3,
                index: i,
                terms: vec![(i % 5) as u32, ((i + 1) % 5) as u32, ((i * 7) % 11) as u32],
            });
        }
        let chunks = coordinator.split(&sents);
        Document::new(text, sents, Vocabulary::new(), chunks)
    }

    fn strip_timing(outcomes: Vec<ChunkOutcome>) -> Vec<(Chunk, RankOutput, Vec<usize>)> {
        outcomes
            .into_iter()
            .map(|o| (o.chunk, o.rank, o.selected))
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = ChunkCoordinator::new(30, 100).unwrap().with_parallel(false);
        let parallel = ChunkCoordinator::new(30, 100).unwrap().with_parallel(true);
        let doc = document(&sequential);
        assert_eq!(doc.chunks().len(), 4);

        for algorithm in [Algorithm::TextRank, Algorithm::TfIdf] {
            let ranker = Ranker::from_config(&SummarizerConfig::default().with_algorithm(algorithm));
            let selector = SentenceSelector::new(0.3);

            let a = strip_timing(sequential.rank_chunks(&doc, &ranker, &selector));
            let b = strip_timing(parallel.rank_chunks(&doc, &ranker, &selector));
            assert_eq!(a, b);
            assert!(a.iter().all(|(_, _, selected)| selected.len() == 3));
        }
    }

    #[test]
    fn test_chunk_ranking_is_independent() {
        let coordinator = ChunkCoordinator::new(30, 100).unwrap();
        let doc = document(&coordinator);
        let ranker = Ranker::from_config(&SummarizerConfig::default());
        let selector = SentenceSelector::new(0.3);

        let all = coordinator.rank_chunks(&doc, &ranker, &selector);
        let alone = process_chunk(&doc, &doc.chunks()[2], &ranker, &selector);
        assert_eq!(all[2].rank, alone.rank);
        assert_eq!(all[2].selected, alone.selected);
    }
}
