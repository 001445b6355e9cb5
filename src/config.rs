//! Summarizer configuration.
//!
//! A [`SummarizerConfig`] is one immutable value passed to every
//! summarization call. Nothing is read from process-wide state.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "ratio": 0.05,
//!   "auto_ratio": false,
//!   "algorithm": "textrank",
//!   "chunk_size_chars": 100000,
//!   "max_sentences_per_chunk": 5000,
//!   "damping": 0.85,
//!   "convergence_epsilon": 1e-6,
//!   "max_iterations": 100,
//!   "keyword_count": 20,
//!   "tokenizer": "jieba"
//! }
//! ```
//!
//! Every field is optional in JSON and falls back to [`SummarizerConfig::default`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigIssue};

/// Sentence ranking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Iterative ranking over a sentence similarity graph.
    #[default]
    #[serde(rename = "textrank", alias = "text_rank")]
    TextRank,
    /// Sum of TF-IDF term weights, no graph.
    #[serde(rename = "tfidf", alias = "tf_idf")]
    TfIdf,
}

impl Algorithm {
    /// Returns the user-facing name used in JSON and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextRank => "textrank",
            Self::TfIdf => "tfidf",
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigIssue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "textrank" | "text_rank" => Ok(Self::TextRank),
            "tfidf" | "tf_idf" | "tf-idf" => Ok(Self::TfIdf),
            other => Err(ConfigIssue::new(
                "algorithm",
                format!("unknown algorithm '{other}' (expected textrank or tfidf)"),
            )),
        }
    }
}

/// Word segmentation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Dictionary-based Chinese word segmentation.
    #[default]
    Jieba,
    /// One token per character.
    Chars,
}

impl TokenizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jieba => "jieba",
            Self::Chars => "chars",
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = ConfigIssue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "jieba" => Ok(Self::Jieba),
            "chars" | "char" | "characters" => Ok(Self::Chars),
            other => Err(ConfigIssue::new(
                "tokenizer",
                format!("unknown tokenizer '{other}' (expected jieba or chars)"),
            )),
        }
    }
}

/// Configuration for one summarization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Fraction of sentences to keep. `<= 0` keeps none, `>= 1` keeps all.
    pub ratio: f64,
    /// Ignore `ratio` and pick one from the input length (see [`ratio_for_size`]).
    pub auto_ratio: bool,
    /// Ranking strategy.
    pub algorithm: Algorithm,
    /// Character budget of one chunk.
    pub chunk_size_chars: usize,
    /// Sentence budget of one chunk.
    pub max_sentences_per_chunk: usize,
    /// TextRank damping factor, strictly between 0 and 1.
    pub damping: f64,
    /// TextRank stops once the L1 score delta drops below this.
    pub convergence_epsilon: f64,
    /// TextRank iteration cap.
    pub max_iterations: usize,
    /// Number of document keywords to extract.
    pub keyword_count: usize,
    /// Word segmentation strategy.
    pub tokenizer: TokenizerKind,
    /// Sentences shorter than this with no content tokens are demoted at selection.
    pub min_sentence_chars: usize,
    /// Keywords shorter than this (in characters) are skipped.
    pub keyword_min_chars: usize,
    /// Joins selected sentences in the summary text.
    pub separator: String,
    /// Treat a newline as a sentence boundary.
    pub break_on_newlines: bool,
    /// Rank chunks on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            ratio: 0.05,
            auto_ratio: false,
            algorithm: Algorithm::TextRank,
            chunk_size_chars: 100_000,
            max_sentences_per_chunk: 5_000,
            damping: 0.85,
            convergence_epsilon: 1e-6,
            max_iterations: 100,
            keyword_count: 20,
            tokenizer: TokenizerKind::Jieba,
            min_sentence_chars: 4,
            keyword_min_chars: 2,
            separator: "\n".to_string(),
            break_on_newlines: false,
            parallel: true,
        }
    }
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_auto_ratio(mut self, auto_ratio: bool) -> Self {
        self.auto_ratio = auto_ratio;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_chunk_size_chars(mut self, chunk_size_chars: usize) -> Self {
        self.chunk_size_chars = chunk_size_chars;
        self
    }

    pub fn with_max_sentences_per_chunk(mut self, max_sentences_per_chunk: usize) -> Self {
        self.max_sentences_per_chunk = max_sentences_per_chunk;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_convergence_epsilon(mut self, convergence_epsilon: f64) -> Self {
        self.convergence_epsilon = convergence_epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_keyword_count(mut self, keyword_count: usize) -> Self {
        self.keyword_count = keyword_count;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_min_sentence_chars(mut self, min_sentence_chars: usize) -> Self {
        self.min_sentence_chars = min_sentence_chars;
        self
    }

    pub fn with_keyword_min_chars(mut self, keyword_min_chars: usize) -> Self {
        self.keyword_min_chars = keyword_min_chars;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_break_on_newlines(mut self, break_on_newlines: bool) -> Self {
        self.break_on_newlines = break_on_newlines;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Ratio applied to an input of `input_chars` characters.
    pub fn effective_ratio(&self, input_chars: usize) -> f64 {
        if self.auto_ratio {
            ratio_for_size(input_chars)
        } else {
            self.ratio
        }
    }

    /// Check every field and report all problems at once.
    ///
    /// Out-of-range ratios are not errors: they clamp at selection time.
    /// A NaN or infinite ratio is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut report = ConfigError::default();

        if !self.ratio.is_finite() {
            report.issues.push(ConfigIssue::new(
                "ratio",
                format!("must be a finite number, got {}", self.ratio),
            ));
        }
        check_chunk_budgets(
            self.chunk_size_chars,
            self.max_sentences_per_chunk,
            &mut report,
        );
        if !(self.damping > 0.0 && self.damping < 1.0) {
            report.issues.push(ConfigIssue::new(
                "damping",
                format!("must be in (0, 1), got {}", self.damping),
            ));
        }
        if !(self.convergence_epsilon.is_finite() && self.convergence_epsilon > 0.0) {
            report.issues.push(ConfigIssue::new(
                "convergence_epsilon",
                format!("must be a positive number, got {}", self.convergence_epsilon),
            ));
        }
        if self.max_iterations == 0 {
            report
                .issues
                .push(ConfigIssue::new("max_iterations", "must be > 0"));
        }

        if report.has_issues() {
            Err(report)
        } else {
            Ok(())
        }
    }
}

/// Default ratio for an input of `input_chars` characters.
///
/// Longer inputs keep a smaller share so the summary stays readable:
///
/// | input chars   | ratio |
/// |---------------|-------|
/// | > 10,000,000  | 0.003 |
/// | > 5,000,000   | 0.005 |
/// | > 1,000,000   | 0.01  |
/// | > 500,000     | 0.02  |
/// | > 100,000     | 0.05  |
/// | otherwise     | 0.1   |
pub fn ratio_for_size(input_chars: usize) -> f64 {
    match input_chars {
        n if n > 10_000_000 => 0.003,
        n if n > 5_000_000 => 0.005,
        n if n > 1_000_000 => 0.01,
        n if n > 500_000 => 0.02,
        n if n > 100_000 => 0.05,
        _ => 0.1,
    }
}

/// Both chunk budgets must be positive.
pub(crate) fn check_chunk_budgets(
    chunk_size_chars: usize,
    max_sentences_per_chunk: usize,
    report: &mut ConfigError,
) {
    if chunk_size_chars == 0 {
        report
            .issues
            .push(ConfigIssue::new("chunk_size_chars", "must be > 0"));
    }
    if max_sentences_per_chunk == 0 {
        report
            .issues
            .push(ConfigIssue::new("max_sentences_per_chunk", "must be > 0"));
    }
}
