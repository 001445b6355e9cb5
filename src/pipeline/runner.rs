//! Pipeline runner: orchestrates stage execution.
//!
//! [`Summarizer`] owns every stage component, built once from a validated
//! [`SummarizerConfig`]. [`Summarizer::run`] executes the stages in order and
//! notifies a [`SummaryObserver`] at each boundary:
//!
//! 1. Segment: split sentences, tokenize, intern terms
//! 2. Keywords: document-wide TF-IDF keywords
//! 3. Chunk: partition sentences under the chunk budgets
//! 4. Rank: vectorize, rank and select each chunk (in parallel)
//! 5. Assemble: join the selection and compute statistics
//!
//! Building a `Summarizer` loads the jieba dictionary when that tokenizer is
//! configured, so reuse one instance across documents.

use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::nlp::segmenter::Segmenter;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{cjk_ratio, Tokenizer};
use crate::pipeline::coordinator::ChunkCoordinator;
use crate::pipeline::observer::{
    NoopObserver, StageClock, StageReport, SummaryObserver, STAGE_ASSEMBLE, STAGE_CHUNK,
    STAGE_KEYWORDS, STAGE_RANK, STAGE_SEGMENT,
};
use crate::rank::Ranker;
use crate::summarizer::vectorizer::corpus_keywords;
use crate::summarizer::{ChunkStats, SentenceSelector, SummaryAssembler, SummaryOutput};
use crate::types::Document;

/// Below this share of CJK ideographs the input is probably not Chinese.
pub const CJK_WARN_THRESHOLD: f64 = 0.3;

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Extractive summarizer with its stage components.
#[derive(Debug)]
pub struct Summarizer {
    config: SummarizerConfig,
    segmenter: Segmenter,
    coordinator: ChunkCoordinator,
    ranker: Ranker,
    selector: SentenceSelector,
    assembler: SummaryAssembler,
}

impl Summarizer {
    /// Validate `config` and build every stage.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;

        let segmenter = Segmenter::new(Tokenizer::new(config.tokenizer), StopwordFilter::new())
            .with_break_on_newlines(config.break_on_newlines);
        let coordinator =
            ChunkCoordinator::new(config.chunk_size_chars, config.max_sentences_per_chunk)?
                .with_parallel(config.parallel);
        let ranker = Ranker::from_config(&config);
        let selector =
            SentenceSelector::new(config.ratio).with_min_sentence_chars(config.min_sentence_chars);
        let assembler =
            SummaryAssembler::new(config.separator.clone(), config.algorithm, config.ratio);

        Ok(Self {
            config,
            segmenter,
            coordinator,
            ranker,
            selector,
            assembler,
        })
    }

    /// Summarize `text` with no observer.
    pub fn summarize(&self, text: &str) -> SummaryOutput {
        self.run(text, &mut NoopObserver)
    }

    /// Summarize `text`, reporting each stage to `observer`.
    pub fn run(&self, text: &str, observer: &mut impl SummaryObserver) -> SummaryOutput {
        let total = StageClock::start();

        let cjk = cjk_ratio(text);
        #[cfg(feature = "tracing")]
        if !text.trim().is_empty() && cjk < CJK_WARN_THRESHOLD {
            tracing::warn!(
                cjk_ratio = cjk,
                "input has few CJK characters; segmentation may be poor"
            );
        }

        // Stage 1: segment
        let segmented = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let segmented = self.segmenter.segment(text);
            let report = StageReport::new(clock.elapsed()).with_items(segmented.sentences.len());
            observer.on_stage_end(STAGE_SEGMENT, &report);
            segmented
        };

        // Stage 2: keywords
        let keywords = {
            trace_stage!(STAGE_KEYWORDS);
            observer.on_stage_start(STAGE_KEYWORDS);
            let clock = StageClock::start();
            let keywords = corpus_keywords(
                &segmented.sentences,
                &segmented.vocabulary,
                self.config.keyword_count,
                self.config.keyword_min_chars,
            );
            let report = StageReport::new(clock.elapsed()).with_items(keywords.len());
            observer.on_stage_end(STAGE_KEYWORDS, &report);
            keywords
        };

        // Stage 3: chunk
        let document = {
            trace_stage!(STAGE_CHUNK);
            observer.on_stage_start(STAGE_CHUNK);
            let clock = StageClock::start();
            let chunks = self.coordinator.split(&segmented.sentences);
            let document = Document::new(
                text.to_string(),
                segmented.sentences,
                segmented.vocabulary,
                chunks,
            );
            let report = StageReport::new(clock.elapsed()).with_items(document.chunks().len());
            observer.on_stage_end(STAGE_CHUNK, &report);
            document
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = document.sentences().len(),
            chunks = document.chunks().len(),
            terms = document.vocabulary().len(),
            "document segmented"
        );

        let ratio = self.config.effective_ratio(document.char_count());
        let selector = self.selector.clone().with_ratio(ratio);
        #[cfg(feature = "tracing")]
        if self.config.auto_ratio {
            tracing::debug!(
                input_chars = document.char_count(),
                ratio,
                "ratio chosen from input size"
            );
        }

        // Stage 4: rank
        let outcomes = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let outcomes = self
                .coordinator
                .rank_chunks(&document, &self.ranker, &selector);
            for outcome in &outcomes {
                observer.on_chunk(&ChunkStats::from_outcome(outcome));
            }
            let report = StageReport::new(clock.elapsed()).with_items(outcomes.len());
            observer.on_stage_end(STAGE_RANK, &report);
            outcomes
        };

        // Stage 5: assemble
        trace_stage!(STAGE_ASSEMBLE);
        observer.on_stage_start(STAGE_ASSEMBLE);
        let clock = StageClock::start();
        let output = self
            .assembler
            .clone()
            .with_requested_ratio(ratio)
            .assemble(&document, &outcomes, keywords, total.elapsed(), cjk);
        let report = StageReport::new(clock.elapsed()).with_items(output.sentences.len());
        observer.on_stage_end(STAGE_ASSEMBLE, &report);

        #[cfg(feature = "tracing")]
        tracing::info!(
            algorithm = self.ranker.algorithm().as_str(),
            input_chars = output.stats.input_chars,
            output_chars = output.stats.output_chars,
            selected = output.stats.selected_count,
            chunks = output.stats.chunk_count,
            realized_ratio = output.stats.realized_ratio,
            elapsed_secs = output.stats.elapsed_secs,
            "summary complete"
        );

        output
    }
}
