//! End-to-end summarization tests.

use rapid_summary::{
    summarize, summarize_with_observer, Algorithm, Error, StageTimingObserver, Summarizer,
    SummarizerConfig, TokenizerKind,
};

const MARKET: &str = "甲去了集市。乙在家看书。丙也去了集市，和甲聊了很久。";

/// Thousand Character Classic, no terminators inside.
const CLASSIC: &str = "天地玄黄宇宙洪荒日月盈昃辰宿列张寒来暑往秋收冬藏闰余成岁律吕调阳云腾致雨露结为霜金生丽水玉出昆冈剑号巨阙珠称夜光果珍李柰菜重芥姜海咸河淡鳞潜羽翔";

/// `count` sentences of exactly 50 characters each (49 ideographs + `。`).
fn synthetic(count: usize) -> String {
    let alphabet: Vec<char> = CLASSIC.chars().collect();
    let mut text = String::new();
    for i in 0..count {
        let offset = (i * 7) % alphabet.len();
        text.extend((0..49).map(|j| alphabet[(offset + j * (1 + i % 3)) % alphabet.len()]));
        text.push('。');
    }
    text
}

fn chars_config() -> SummarizerConfig {
    SummarizerConfig::default().with_tokenizer(TokenizerKind::Chars)
}

#[test]
fn test_market_tfidf_picks_richest_sentence() {
    let config = chars_config()
        .with_ratio(0.34)
        .with_chunk_size_chars(1000)
        .with_algorithm(Algorithm::TfIdf);
    let out = summarize(MARKET, &config).unwrap();

    assert_eq!(out.sentences.len(), 1);
    assert_eq!(out.text, "丙也去了集市，和甲聊了很久。");
    assert_eq!(out.indices(), vec![2]);
    assert_eq!(out.stats.sentence_count, 3);
}

#[test]
fn test_market_with_jieba() {
    let config = SummarizerConfig::default()
        .with_ratio(0.34)
        .with_chunk_size_chars(1000)
        .with_algorithm(Algorithm::TfIdf);
    let out = summarize(MARKET, &config).unwrap();

    assert_eq!(out.sentences.len(), 1);
    assert!(out.text.contains("集市"), "{}", out.text);
    assert!(out.text.ends_with('。'));
    assert!(out.keywords.iter().any(|k| k.term == "集市"));
}

#[test]
fn test_market_textrank() {
    let config = chars_config().with_ratio(0.34);
    let out = summarize(MARKET, &config).unwrap();

    assert_eq!(out.sentences.len(), 1);
    // The two market sentences reinforce each other
    assert!(out.text.contains("集市"), "{}", out.text);
    assert!(out.stats.chunks[0].converged);
}

#[test]
fn test_large_document_splits_into_three_chunks() {
    let text = synthetic(5_000);
    assert_eq!(text.chars().count(), 250_000);

    let config = chars_config()
        .with_algorithm(Algorithm::TfIdf)
        .with_chunk_size_chars(100_000)
        .with_max_sentences_per_chunk(5_000)
        .with_ratio(0.01);
    let out = summarize(&text, &config).unwrap();

    assert_eq!(out.stats.chunk_count, 3);
    let sizes: Vec<usize> = out.stats.chunks.iter().map(|c| c.char_count).collect();
    assert_eq!(sizes, vec![100_000, 100_000, 50_000]);
    let counts: Vec<usize> = out.stats.chunks.iter().map(|c| c.selected_count).collect();
    assert_eq!(counts, vec![20, 20, 10]);

    let indices = out.indices();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    assert!(out.sentences.iter().any(|s| s.chunk_index == 2));
    assert_eq!(out.stats.input_chars, 250_000);
    assert_eq!(out.stats.output_chars, 50 * 50);
}

#[test]
fn test_ratio_one_returns_everything() {
    let out = summarize(MARKET, &chars_config().with_ratio(1.0)).unwrap();
    assert_eq!(out.indices(), vec![0, 1, 2]);
    assert_eq!(out.text, "甲去了集市。\n乙在家看书。\n丙也去了集市，和甲聊了很久。");
}

#[test]
fn test_ratio_zero_returns_nothing() {
    let out = summarize(MARKET, &chars_config().with_ratio(0.0)).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.text, "");
    assert_eq!(out.stats.realized_ratio, 0.0);
    assert_eq!(out.stats.sentence_count, 3);
}

#[test]
fn test_empty_and_blank_input() {
    for text in ["", "   \n\t "] {
        let out = summarize(text, &chars_config()).unwrap();
        assert!(out.is_empty());
        assert!(out.keywords.is_empty());
        assert_eq!(out.stats.realized_ratio, 0.0);
        assert_eq!(out.stats.chunk_count, 0);
    }
}

#[test]
fn test_input_without_terminators_is_one_sentence() {
    let out = summarize("没有标点的一段文字", &chars_config()).unwrap();
    assert_eq!(out.stats.sentence_count, 1);
    assert_eq!(out.text, "没有标点的一段文字");
}

#[test]
fn test_all_stopword_chunk_keeps_original_order() {
    let out = summarize("了。的。吗？呢！", &chars_config().with_ratio(0.5)).unwrap();
    assert_eq!(out.indices(), vec![0, 1]);
    assert_eq!(out.text, "了。\n的。");
}

#[test]
fn test_custom_separator() {
    let out = summarize(MARKET, &chars_config().with_ratio(1.0).with_separator("")).unwrap();
    assert_eq!(out.text, MARKET);
}

#[test]
fn test_identical_runs_identical_output() {
    let text = synthetic(300);
    let summarizer = Summarizer::new(
        chars_config()
            .with_ratio(0.1)
            .with_chunk_size_chars(2_000),
    )
    .unwrap();

    let a = summarizer.summarize(&text);
    let b = summarizer.summarize(&text);
    assert_eq!(a.text, b.text);
    assert_eq!(a.sentences, b.sentences);
    assert_eq!(a.keywords, b.keywords);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let text = synthetic(300);
    let config = chars_config().with_ratio(0.1).with_chunk_size_chars(2_000);

    let parallel = summarize(&text, &config.clone().with_parallel(true)).unwrap();
    let sequential = summarize(&text, &config.with_parallel(false)).unwrap();
    assert!(parallel.stats.chunk_count > 1);
    assert_eq!(parallel.sentences, sequential.sentences);
}

#[test]
fn test_realized_ratio_tracks_selection() {
    let text = synthetic(200);
    let out = summarize(&text, &chars_config().with_ratio(0.1)).unwrap();

    let selected_chars: usize = out.sentences.iter().map(|s| s.char_len).sum();
    assert_eq!(out.stats.output_chars, selected_chars);
    assert_eq!(out.sentences.len(), 20);
    assert!((out.stats.realized_ratio - 0.1).abs() < 1e-9);
}

#[test]
fn test_auto_ratio_follows_input_size() {
    let text = synthetic(200);
    let config = chars_config().with_ratio(0.5).with_auto_ratio(true);
    let out = summarize(&text, &config).unwrap();

    assert_eq!(out.stats.requested_ratio, 0.1);
    assert_eq!(out.sentences.len(), 20);
}

#[test]
fn test_closer_then_terminator_stays_in_sentence() {
    let out = summarize("他说：“走吧！”。她走了。", &chars_config().with_ratio(1.0)).unwrap();
    assert_eq!(out.stats.sentence_count, 2);
    assert_eq!(out.text, "他说：“走吧！”。\n她走了。");
}

#[test]
fn test_zero_chunk_budget_is_rejected() {
    let config = chars_config().with_max_sentences_per_chunk(0);
    match Summarizer::new(config) {
        Err(Error::InvalidConfig(report)) => {
            assert!(report.issue("max_sentences_per_chunk").is_some());
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_reports_every_field() {
    let config = SummarizerConfig::default()
        .with_damping(0.0)
        .with_max_iterations(0)
        .with_convergence_epsilon(-1.0);

    match summarize(MARKET, &config) {
        Err(Error::InvalidConfig(report)) => {
            assert_eq!(report.issues.len(), 3);
            assert!(report.issue("damping").is_some());
            assert!(report.issue("max_iterations").is_some());
            assert!(report.issue("convergence_epsilon").is_some());
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_config_from_json() {
    let config = SummarizerConfig::from_json(
        r#"{ "ratio": 0.34, "algorithm": "tfidf", "tokenizer": "chars", "chunk_size_chars": 1000 }"#,
    )
    .unwrap();
    let out = summarize(MARKET, &config).unwrap();
    assert_eq!(out.text, "丙也去了集市，和甲聊了很久。");
}

#[test]
fn test_observer_sees_stages_and_chunks() {
    let text = synthetic(100);
    let config = chars_config().with_ratio(0.1).with_chunk_size_chars(1_000);
    let mut obs = StageTimingObserver::new();
    let out = summarize_with_observer(&text, &config, &mut obs).unwrap();

    assert_eq!(obs.reports().len(), 5);
    assert_eq!(obs.chunks().len(), 5);
    assert_eq!(obs.chunks().len(), out.stats.chunk_count);
}

#[test]
fn test_non_chinese_input_reports_low_cjk_ratio() {
    let out = summarize(
        "The fox ran. The dog slept. The fox ran again.",
        &chars_config().with_ratio(0.34),
    )
    .unwrap();
    assert!(out.stats.cjk_ratio < 0.3);
    assert_eq!(out.sentences.len(), 1);
}

#[test]
fn test_output_serializes_to_json() {
    let out = summarize(MARKET, &chars_config().with_ratio(0.34)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
    assert_eq!(json["stats"]["sentence_count"], 3);
    assert_eq!(json["stats"]["algorithm"], "textrank");
}
