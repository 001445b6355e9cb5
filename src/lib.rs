//! Extractive summarization for long Chinese text.
//!
//! The input is split into sentences, segmented into words, and partitioned
//! into sentence-aligned chunks. Each chunk is ranked on its own, either by
//! TextRank over a cosine-similarity graph of TF-IDF sentence vectors or by
//! summed TF-IDF weight, and the top fraction of its sentences is kept. The
//! kept sentences are emitted in their original order.
//!
//! ```no_run
//! use rapid_summary::{summarize, Algorithm, SummarizerConfig};
//!
//! let config = SummarizerConfig::default()
//!     .with_ratio(0.1)
//!     .with_algorithm(Algorithm::TextRank);
//! let summary = summarize("甲去了集市。乙在家看书。丙也去了集市，和甲聊了很久。", &config)?;
//! println!("{}", summary.text);
//! # Ok::<(), rapid_summary::Error>(())
//! ```
//!
//! For many documents, build one [`Summarizer`] and reuse it; construction
//! loads the segmentation dictionary.

pub mod config;
pub mod error;
pub mod graph;
pub mod nlp;
pub mod pipeline;
pub mod rank;
pub mod summarizer;
pub mod types;

pub use config::{ratio_for_size, Algorithm, SummarizerConfig, TokenizerKind};
pub use error::{ConfigError, ConfigIssue, Error, Result};
pub use pipeline::{NoopObserver, StageReport, StageTimingObserver, Summarizer, SummaryObserver};
pub use summarizer::{ChunkStats, SelectedSentence, SummaryOutput, SummaryStats};
pub use types::Keyword;

/// Summarize `text` with `config`.
///
/// Fails only when `config` is invalid. Empty input gives an empty summary.
pub fn summarize(text: &str, config: &SummarizerConfig) -> Result<SummaryOutput> {
    Ok(Summarizer::new(config.clone())?.summarize(text))
}

/// Like [`summarize`], reporting stage boundaries and chunk statistics to
/// `observer`.
pub fn summarize_with_observer(
    text: &str,
    config: &SummarizerConfig,
    observer: &mut impl SummaryObserver,
) -> Result<SummaryOutput> {
    Ok(Summarizer::new(config.clone())?.run(text, observer))
}
