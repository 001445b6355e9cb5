//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries and after each chunk
//! is ranked, without coupling to stage logic.

use std::time::{Duration, Instant};

use crate::summarizer::ChunkStats;

pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_KEYWORDS: &str = "keywords";
pub const STAGE_CHUNK: &str = "chunk";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_ASSEMBLE: &str = "assemble";

/// Every stage, in execution order.
pub const STAGES: &[&str] = &[
    STAGE_SEGMENT,
    STAGE_KEYWORDS,
    STAGE_CHUNK,
    STAGE_RANK,
    STAGE_ASSEMBLE,
];

/// What a stage reports when it finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Number of items the stage produced (sentences, keywords, chunks, ...)
    pub items: usize,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed, items: 0 }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = items;
        self
    }
}

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Receives pipeline notifications. Every method has an empty default.
pub trait SummaryObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once per chunk, in chunk order, after ranking completes.
    fn on_chunk(&mut self, _stats: &ChunkStats) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SummaryObserver for NoopObserver {}

/// Records stage timings and chunk statistics.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    stages: Vec<(&'static str, StageReport)>,
    chunks: Vec<ChunkStats>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished stages in completion order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.stages
    }

    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(stage, _)| *stage == name)
            .map(|(_, report)| report)
    }

    pub fn chunks(&self) -> &[ChunkStats] {
        &self.chunks
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, report)| report.elapsed).sum()
    }
}

impl SummaryObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, report.clone()));
    }

    fn on_chunk(&mut self, stats: &ChunkStats) {
        self.chunks.push(stats.clone());
    }
}
