//! Core data model: documents, sentences, chunks, keywords.
//!
//! Sentences and chunks never copy text. A [`Sentence`] is a byte span into
//! the [`Document`] buffer and a [`Chunk`] is a range of global sentence
//! indices, so boundaries are cheap to validate and nothing is duplicated.

use std::ops::Range;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Interned term identifier, dense in `0..vocabulary.len()`.
pub type TermId = u32;

/// Interning table for normalized terms.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    term_to_id: FxHashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the id for a term.
    pub fn intern(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.term_to_id.get(term) {
            return id;
        }

        let id = self.terms.len() as TermId;
        self.term_to_id.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        id
    }

    pub fn term(&self, id: TermId) -> &str {
        &self.terms[id as usize]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A word unit produced by a tokenizer, before interning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub is_stopword: bool,
}

/// One segmented sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Byte span into the document text.
    pub span: Range<usize>,
    /// Number of Unicode scalar values in the span.
    pub char_len: usize,
    /// Position in the whole document.
    pub index: usize,
    /// Content terms in order, stop words removed, duplicates kept.
    pub terms: Vec<TermId>,
}

impl Sentence {
    /// The sentence text, borrowed from the document buffer.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    /// Short sentences without content terms rank after everything else at selection.
    pub fn is_demoted(&self, min_chars: usize) -> bool {
        self.char_len < min_chars && self.terms.is_empty()
    }
}

/// A sentence-aligned, contiguous slice of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Merge-order key.
    pub index: usize,
    /// Global sentence indices covered by this chunk.
    pub sentences: Range<usize>,
    /// Sum of the sentences' character counts.
    pub char_count: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Global index of the sentence at `local` within this chunk.
    pub fn global_index(&self, local: usize) -> usize {
        self.sentences.start + local
    }
}

/// The immutable text buffer plus everything derived from segmenting it.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    char_count: usize,
    sentences: Vec<Sentence>,
    vocabulary: Vocabulary,
    chunks: Vec<Chunk>,
}

impl Document {
    pub fn new(
        text: String,
        sentences: Vec<Sentence>,
        vocabulary: Vocabulary,
        chunks: Vec<Chunk>,
    ) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            sentences,
            vocabulary,
            chunks,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total character count of the input, whitespace included.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Sentences belonging to a chunk.
    pub fn chunk_sentences(&self, chunk: &Chunk) -> &[Sentence] {
        &self.sentences[chunk.sentences.clone()]
    }

    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        sentence.text(&self.text)
    }
}

/// A document keyword with its aggregate TF-IDF weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
}

impl Keyword {
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}
