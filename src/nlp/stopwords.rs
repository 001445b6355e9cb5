//! Stopword filtering
//!
//! A fixed Chinese function-word list plus the English list from the
//! `stop-words` crate, so mixed-script novels lose their filler in both
//! scripts.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Common Chinese function words and pronouns.
const CHINESE_STOPWORDS: &[&str] = &[
    "的", "了", "和", "是", "就", "都", "而", "及", "与", "或", "这", "那", "你", "我", "他",
    "她", "它", "们", "个", "上", "下", "在", "有", "人", "不", "也", "很", "但", "还", "又",
    "只", "要", "一", "两", "三", "来", "去", "到", "会", "能", "好", "为", "以", "等", "被",
    "给", "让", "把", "从", "对", "将", "于", "可", "更", "最", "已", "再", "吗", "呢", "吧",
    "啊", "着", "过", "之", "其", "此", "我们", "你们", "他们", "她们", "它们", "时候", "没有",
    "什么", "一个", "这个", "那个", "不要", "自己", "可以", "这样", "那样", "如此", "一些",
    "一样", "一起", "所以", "因为", "因此", "为了", "可是", "但是", "然而", "而且", "并且",
    "不过", "如果", "的话", "就是", "是否",
];

/// A filter for removing stopwords from token streams
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordFilter {
    /// Chinese list merged with the English list.
    pub fn new() -> Self {
        let mut stopwords: FxHashSet<String> =
            CHINESE_STOPWORDS.iter().map(|s| s.to_string()).collect();
        stopwords.extend(get(LANGUAGE::English).iter().map(|s| s.to_string()));
        Self { stopwords }
    }

    /// Create an empty stopword filter (no filtering)
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Check if a word is a stopword (ASCII case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.stopwords.contains(&word.to_ascii_lowercase())
        } else {
            self.stopwords.contains(word)
        }
    }
}
