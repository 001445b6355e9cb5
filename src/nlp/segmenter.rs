//! Sentence segmentation.
//!
//! Boundaries are a fixed set of Chinese and ASCII terminators. A boundary is
//! a maximal run of terminators and closing quotes or brackets, so closers
//! stay with the sentence they close and a terminator that follows a closer
//! does not start a sentence of its own:
//!
//! ```text
//! 他说：“走吧！”。她没回答……
//!             ^^^^ one boundary
//! -> ["他说：“走吧！”。", "她没回答……"]
//! ```
//!
//! Straight quotes (`"`, `'`) open as often as they close, so they only join a
//! boundary when whitespace, punctuation or the end of text follows them.

use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

use super::stopwords::StopwordFilter;
use super::tokenizer::{normalize, Tokenizer};
use crate::types::{Sentence, Vocabulary};

/// Characters that end a sentence.
pub const TERMINATORS: &[char] = &['。', '！', '？', '；', '…', '.', '!', '?', ';'];

/// Closing quotes and brackets absorbed into a boundary.
pub const CLOSERS: &[char] = &[
    '”', '’', '」', '』', '）', ')', '】', '》', '〉', '"', '\'', '］', ']', '}', '｝',
];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

fn is_closer(c: char) -> bool {
    CLOSERS.contains(&c)
}

fn is_straight_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Split `text` into trimmed sentence byte spans.
///
/// A `.` between two ASCII digits is a decimal point, not a boundary. When
/// `break_on_newlines` is set, `\n` also closes a sentence. Spans without a
/// single alphanumeric character (stray punctuation, whitespace) are dropped.
/// Input with no boundary at all yields one span covering the trimmed input.
pub fn split_sentences(text: &str, break_on_newlines: bool) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut prev = None;
    let mut start = 0;

    while let Some((pos, c)) = chars.next() {
        if break_on_newlines && c == '\n' {
            push_sentence(text, start..pos, &mut spans);
            start = pos + c.len_utf8();
        } else if is_terminator(c) {
            let next = chars.peek().map(|&(_, n)| n);
            if !is_decimal_point(prev, c, next) {
                let end = consume_boundary(&mut chars, text.len());
                push_sentence(text, start..end, &mut spans);
                start = end;
            }
        }
        prev = Some(c);
    }
    push_sentence(text, start..text.len(), &mut spans);

    spans
}

fn is_decimal_point(prev: Option<char>, c: char, next: Option<char>) -> bool {
    c == '.'
        && prev.is_some_and(|p| p.is_ascii_digit())
        && next.is_some_and(|n| n.is_ascii_digit())
}

/// Consume the rest of a boundary and return the byte offset where the next
/// sentence starts.
fn consume_boundary(chars: &mut Peekable<CharIndices<'_>>, text_len: usize) -> usize {
    while let Some(&(_, c)) = chars.peek() {
        let absorb = is_terminator(c)
            || (is_closer(c) && (!is_straight_quote(c) || quote_closes(chars)));
        if !absorb {
            break;
        }
        chars.next();
    }
    chars.peek().map_or(text_len, |&(pos, _)| pos)
}

/// Whether the straight quote under the cursor ends the sentence: only
/// whitespace, more punctuation or the end of text may follow it.
fn quote_closes(chars: &Peekable<CharIndices<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    ahead
        .peek()
        .map_or(true, |&(_, c)| c.is_whitespace() || is_terminator(c) || is_closer(c))
}

fn push_sentence(text: &str, span: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let slice = &text[span.clone()];
    let trimmed = slice.trim();
    if !trimmed.chars().any(char::is_alphanumeric) {
        return;
    }
    let leading = slice.len() - slice.trim_start().len();
    let start = span.start + leading;
    spans.push(start..start + trimmed.len());
}

/// Output of [`Segmenter::segment`].
#[derive(Debug, Clone, Default)]
pub struct SegmentedText {
    pub sentences: Vec<Sentence>,
    pub vocabulary: Vocabulary,
}

/// Sentence splitting plus per-sentence tokenization.
#[derive(Debug)]
pub struct Segmenter {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    break_on_newlines: bool,
}

impl Segmenter {
    pub fn new(tokenizer: Tokenizer, stopwords: StopwordFilter) -> Self {
        Self {
            tokenizer,
            stopwords,
            break_on_newlines: false,
        }
    }

    pub fn with_break_on_newlines(mut self, break_on_newlines: bool) -> Self {
        self.break_on_newlines = break_on_newlines;
        self
    }

    /// Segment a whole document. Identical input always yields identical output.
    pub fn segment(&self, text: &str) -> SegmentedText {
        let mut vocabulary = Vocabulary::new();
        let sentences = split_sentences(text, self.break_on_newlines)
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                let slice = &text[span.clone()];
                let terms = self
                    .tokenizer
                    .tokenize(slice, &self.stopwords)
                    .into_iter()
                    .filter(|t| !t.is_stopword)
                    .map(|t| vocabulary.intern(&normalize(t.text)))
                    .collect();
                Sentence {
                    char_len: slice.chars().count(),
                    span,
                    index,
                    terms,
                }
            })
            .collect();

        SegmentedText {
            sentences,
            vocabulary,
        }
    }
}
