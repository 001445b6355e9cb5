//! Graph construction and representation
//!
//! This module builds and stores the sentence similarity graph that
//! TextRank iterates over.

pub mod builder;
pub mod csr;

pub use builder::SimilarityGraphBuilder;
pub use csr::CsrGraph;
