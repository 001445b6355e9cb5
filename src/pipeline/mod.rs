//! Summarization pipeline
//!
//! This module provides the stage runner, chunk coordination, and observer
//! hooks for timing and debugging.

pub mod coordinator;
pub mod observer;
pub mod runner;

pub use coordinator::{ChunkCoordinator, ChunkOutcome};
pub use observer::{NoopObserver, StageReport, StageTimingObserver, SummaryObserver};
pub use runner::Summarizer;
