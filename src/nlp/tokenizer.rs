//! Word segmentation
//!
//! Chinese has no spaces between words, so tokens come either from jieba's
//! dictionary segmentation or, as a fallback, from individual characters.

use jieba_rs::Jieba;

use super::stopwords::StopwordFilter;
use crate::config::TokenizerKind;
use crate::types::Token;

/// Splits a sentence into word tokens and flags the ones to drop.
pub enum Tokenizer {
    /// Dictionary segmentation with HMM new-word discovery.
    Jieba(Box<Jieba>),
    /// One token per character.
    Chars,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Jieba(_) => "Tokenizer::Jieba",
            Self::Chars => "Tokenizer::Chars",
        })
    }
}

impl Tokenizer {
    /// Build the tokenizer for a kind. Loading the jieba dictionary is the
    /// expensive part, so build once and reuse.
    pub fn new(kind: TokenizerKind) -> Self {
        match kind {
            TokenizerKind::Jieba => Self::Jieba(Box::new(Jieba::new())),
            TokenizerKind::Chars => Self::Chars,
        }
    }

    /// Tokenize a sentence. Whitespace is skipped; punctuation and stop words
    /// are returned with `is_stopword = true`.
    pub fn tokenize<'a>(&self, sentence: &'a str, stopwords: &StopwordFilter) -> Vec<Token<'a>> {
        let classify = |text: &'a str| Token {
            text,
            is_stopword: !has_content(text) || stopwords.is_stopword(text),
        };

        match self {
            Self::Jieba(jieba) => jieba
                .cut(sentence, true)
                .into_iter()
                .filter(|w| !w.trim().is_empty())
                .map(classify)
                .collect(),
            Self::Chars => sentence
                .char_indices()
                .filter(|(_, c)| !c.is_whitespace())
                .map(|(i, c)| classify(&sentence[i..i + c.len_utf8()]))
                .collect(),
        }
    }
}

/// A token carries content if any of its characters is a letter or digit
/// (CJK ideographs count as letters).
fn has_content(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// Normalized form used for interning: ASCII is lowercased, everything else kept.
pub fn normalize(text: &str) -> std::borrow::Cow<'_, str> {
    if text.bytes().any(|b| b.is_ascii_uppercase()) {
        std::borrow::Cow::Owned(text.to_ascii_lowercase())
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

/// True for CJK unified ideographs, the basic block plus extension A.
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

/// Share of CJK ideographs among all characters of `text`, 0 when empty.
pub fn cjk_ratio(text: &str) -> f64 {
    let (cjk, total) = text
        .chars()
        .fold((0usize, 0usize), |(cjk, total), c| (cjk + is_cjk(c) as usize, total + 1));
    if total == 0 {
        0.0
    } else {
        cjk as f64 / total as f64
    }
}
