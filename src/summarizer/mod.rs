//! Summarization components
//!
//! Vectorization, per-chunk sentence selection, and final assembly of the
//! summary text, keywords and statistics.

pub mod assembler;
pub mod selector;
pub mod vectorizer;

pub use assembler::{ChunkStats, SelectedSentence, SummaryAssembler, SummaryOutput, SummaryStats};
pub use selector::{target_count, SentenceSelector};
