//! Summary assembly: text, keywords and statistics.
//!
//! The realized ratio is selected characters over input characters. Per-chunk
//! rounding means it can drift slightly from the requested ratio.

use std::time::Duration;

use serde::Serialize;

use crate::config::Algorithm;
use crate::pipeline::coordinator::ChunkOutcome;
use crate::types::{Document, Keyword};

/// One sentence that made it into the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSentence {
    /// Position in the whole document
    pub global_index: usize,
    pub chunk_index: usize,
    /// Position within the chunk
    pub local_index: usize,
    /// Verbatim sentence text, terminator included
    pub text: String,
    pub char_len: usize,
    /// Score assigned by the ranker
    pub score: f64,
}

/// Statistics for one chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkStats {
    pub index: usize,
    pub sentence_count: usize,
    pub selected_count: usize,
    pub char_count: usize,
    pub iterations: usize,
    pub converged: bool,
    pub elapsed_secs: f64,
}

impl ChunkStats {
    pub fn from_outcome(outcome: &ChunkOutcome) -> Self {
        Self {
            index: outcome.chunk.index,
            sentence_count: outcome.chunk.len(),
            selected_count: outcome.selected.len(),
            char_count: outcome.chunk.char_count,
            iterations: outcome.rank.iterations,
            converged: outcome.rank.converged,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
        }
    }
}

/// Whole-document statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub algorithm: Algorithm,
    pub elapsed_secs: f64,
    pub input_chars: usize,
    pub output_chars: usize,
    pub requested_ratio: f64,
    /// `output_chars / input_chars`, 0 for empty input
    pub realized_ratio: f64,
    pub sentence_count: usize,
    pub selected_count: usize,
    pub chunk_count: usize,
    pub chars_per_second: f64,
    /// Share of CJK ideographs in the input
    pub cjk_ratio: f64,
    pub chunks: Vec<ChunkStats>,
}

/// Everything a summarization request produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryOutput {
    /// Selected sentences joined by the configured separator
    pub text: String,
    /// Selected sentences, ascending by global index
    pub sentences: Vec<SelectedSentence>,
    pub keywords: Vec<Keyword>,
    pub stats: SummaryStats,
}

impl SummaryOutput {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Global indices of the selected sentences
    pub fn indices(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.global_index).collect()
    }

    /// Serialize to pretty JSON for callers that persist results
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds a [`SummaryOutput`] from merged chunk outcomes.
#[derive(Debug, Clone)]
pub struct SummaryAssembler {
    separator: String,
    algorithm: Algorithm,
    requested_ratio: f64,
}

impl SummaryAssembler {
    pub fn new(separator: impl Into<String>, algorithm: Algorithm, requested_ratio: f64) -> Self {
        Self {
            separator: separator.into(),
            algorithm,
            requested_ratio,
        }
    }

    pub fn with_requested_ratio(mut self, requested_ratio: f64) -> Self {
        self.requested_ratio = requested_ratio;
        self
    }

    /// `outcomes` must already be in ascending chunk order.
    pub fn assemble(
        &self,
        document: &Document,
        outcomes: &[ChunkOutcome],
        keywords: Vec<Keyword>,
        elapsed: Duration,
        cjk_ratio: f64,
    ) -> SummaryOutput {
        let sentences: Vec<SelectedSentence> = outcomes
            .iter()
            .flat_map(|outcome| {
                outcome.selected.iter().map(move |&local| {
                    let global = outcome.chunk.global_index(local);
                    let sentence = &document.sentences()[global];
                    SelectedSentence {
                        global_index: global,
                        chunk_index: outcome.chunk.index,
                        local_index: local,
                        text: document.sentence_text(sentence).to_string(),
                        char_len: sentence.char_len,
                        score: outcome.rank.score(local),
                    }
                })
            })
            .collect();

        let text = sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator);

        let input_chars = document.char_count();
        let output_chars: usize = sentences.iter().map(|s| s.char_len).sum();
        let realized_ratio = if input_chars == 0 {
            0.0
        } else {
            output_chars as f64 / input_chars as f64
        };
        let elapsed_secs = elapsed.as_secs_f64();
        let chars_per_second = if elapsed_secs > 0.0 {
            input_chars as f64 / elapsed_secs
        } else {
            0.0
        };

        let stats = SummaryStats {
            algorithm: self.algorithm,
            elapsed_secs,
            input_chars,
            output_chars,
            requested_ratio: self.requested_ratio,
            realized_ratio,
            sentence_count: document.sentences().len(),
            selected_count: sentences.len(),
            chunk_count: outcomes.len(),
            chars_per_second,
            cjk_ratio,
            chunks: outcomes.iter().map(ChunkStats::from_outcome).collect(),
        };

        SummaryOutput {
            text,
            sentences,
            keywords,
            stats,
        }
    }
}
