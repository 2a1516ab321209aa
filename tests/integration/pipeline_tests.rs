/*!
 * Integration tests for the end-to-end caption split pipeline.
 *
 * These tests drive the full parse, segment, dispatch, realign, and assemble
 * flow through mock splitter providers.
 */

use std::collections::HashMap;

use subsplit::app_config::SplitConfig;
use subsplit::caption_parser::CaptionFormat;
use subsplit::errors::AppError;
use subsplit::pipeline::{process_captions, split_timed_cues};
use subsplit::providers::mock::MockSplitter;
use subsplit::subtitle_renderer::Fragment;

use crate::common::{event_payload, word_payload, TruncatingScriptedSplitter};

fn normalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            w.to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A long sentence split by the provider comes back as two exactly-timed
/// fragments
#[tokio::test]
async fn test_process_captions_withSplitResponse_shouldRealignTiming() {
    let payload = word_payload(&[
        ("Hello", 0),
        ("world", 500),
        ("this", 500),
        ("is", 300),
        ("a", 200),
        ("test.", 200),
    ]);

    let mut script = HashMap::new();
    script.insert(
        "Hello world this is a test.".to_string(),
        "Hello world this ### is a test.".to_string(),
    );
    let provider = MockSplitter::scripted(script);
    let config = SplitConfig { long_sentence_threshold: 3, ..SplitConfig::default() };

    let track = process_captions(&payload, CaptionFormat::WordBased, &provider, &config)
        .await
        .unwrap();

    assert_eq!(
        track.fragments,
        vec![
            Fragment::new(0, 999, "Hello world this".to_string()),
            Fragment::new(1000, 2500, "is a test.".to_string()),
        ]
    );

    // Round-trip identity: no word lost, gained, or reordered
    let rejoined = track
        .fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(normalize_words(&rejoined), normalize_words("Hello world this is a test."));
}

/// A response with fewer results than requests degrades only the unmatched
/// tail and never raises
#[tokio::test]
async fn test_process_captions_withShortResponse_shouldKeepTailUnsplit() {
    let payload = word_payload(&[
        ("One", 0),
        ("two", 300),
        ("three.", 300),
        ("Four", 300),
        ("five", 300),
        ("six.", 300),
        ("Seven", 300),
        ("eight", 300),
        ("nine.", 300),
    ]);

    let mut script = HashMap::new();
    script.insert("One two three.".to_string(), "One two ### three.".to_string());
    script.insert("Four five six.".to_string(), "Four five ### six.".to_string());
    script.insert("Seven eight nine.".to_string(), "Seven eight ### nine.".to_string());
    // The third result is dropped from every response
    let provider = TruncatingScriptedSplitter::new(script, 1);
    let config = SplitConfig { long_sentence_threshold: 2, ..SplitConfig::default() };

    let track = process_captions(&payload, CaptionFormat::WordBased, &provider, &config)
        .await
        .unwrap();

    let texts: Vec<&str> = track.fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["One two", "three.", "Four five", "six.", "Seven eight nine."]
    );

    // The unmatched sentence keeps its original timing
    let last = track.fragments.last().unwrap();
    assert_eq!(last.start_ms, 1_800);
    assert_eq!(last.end_ms, 2_400 + 800);
}

/// A provider failure degrades every affected sentence to its unsplit form,
/// in order
#[tokio::test]
async fn test_process_captions_withFailingProvider_shouldKeepAllSentences() {
    let payload = word_payload(&[
        ("Alpha", 0),
        ("beta", 400),
        ("gamma.", 400),
        ("Delta", 400),
        ("epsilon.", 400),
    ]);

    let provider = MockSplitter::failing();
    let config = SplitConfig { long_sentence_threshold: 1, ..SplitConfig::default() };

    let track = process_captions(&payload, CaptionFormat::WordBased, &provider, &config)
        .await
        .unwrap();

    let texts: Vec<&str> = track.fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec!["Alpha beta gamma.", "Delta epsilon."]);
    assert!(track.fragments.windows(2).all(|w| w[0].start_ms <= w[1].start_ms));
}

/// A splitter response whose words differ from the original falls back to the
/// unsplit sentence instead of partially applying spans
#[tokio::test]
async fn test_process_captions_withRewordedResponse_shouldFallBackUnsplit() {
    let payload = word_payload(&[("Keep", 0), ("these", 300), ("words.", 300)]);

    let mut script = HashMap::new();
    script.insert(
        "Keep these words.".to_string(),
        "Keep those ### words.".to_string(),
    );
    let provider = MockSplitter::scripted(script);
    let config = SplitConfig { long_sentence_threshold: 2, ..SplitConfig::default() };

    let track = process_captions(&payload, CaptionFormat::WordBased, &provider, &config)
        .await
        .unwrap();

    assert_eq!(track.fragments.len(), 1);
    assert_eq!(track.fragments[0].text, "Keep these words.");
}

/// The total-task timeout fails closed with no partial output
#[tokio::test]
async fn test_process_captions_withSlowProvider_shouldTimeOut() {
    let payload = word_payload(&[("Slow", 0), ("sentence", 300), ("here.", 300)]);

    let provider = MockSplitter::slow(10_000);
    let config = SplitConfig {
        long_sentence_threshold: 1,
        task_timeout_ms: 100,
        ..SplitConfig::default()
    };

    let result = process_captions(&payload, CaptionFormat::WordBased, &provider, &config).await;
    assert!(matches!(result, Err(AppError::TaskTimedOut(100))));
}

/// An unparseable payload is fatal for the whole parse step
#[tokio::test]
async fn test_process_captions_withBadPayload_shouldFailWithCaptionError() {
    let provider = MockSplitter::identity();
    let config = SplitConfig::default();

    let result =
        process_captions(b"{\"events\": 1}", CaptionFormat::WordBased, &provider, &config).await;
    assert!(matches!(result, Err(AppError::Caption(_))));
}

/// Event-based input flows through the same pipeline
#[tokio::test]
async fn test_process_captions_withEventPayload_shouldSegmentAndAssemble() {
    let payload = event_payload(&[
        (0, vec![("First", 0), ("part.", 400)]),
        (1_000, vec![("Second", 0), ("part.", 500)]),
    ]);

    let provider = MockSplitter::identity();
    let config = SplitConfig::default();

    let track = process_captions(&payload, CaptionFormat::EventBased, &provider, &config)
        .await
        .unwrap();

    assert_eq!(track.fragments.len(), 2);
    assert_eq!(track.fragments[0].text, "First part.");
    assert_eq!(track.fragments[0].start_ms, 0);
    assert_eq!(track.fragments[0].end_ms, 1_000);
    assert_eq!(track.fragments[1].end_ms, 1_500 + 800);
}

/// Translated cues with CJK spaces are split by rule and re-timed by
/// character proportion
#[tokio::test]
async fn test_split_timed_cues_withCjkSpaces_shouldRedistributeByChars() {
    let cues = vec![Fragment::new(
        0,
        2_300,
        "这是一个比较长的句子 后面还有另外一个部分继续说".to_string(),
    )];

    let provider = MockSplitter::identity();
    let config = SplitConfig::default();

    let track = split_timed_cues(&cues, &provider, &config).await.unwrap();

    assert_eq!(
        track.fragments,
        vec![
            Fragment::new(0, 1_000, "这是一个比较长的句子".to_string()),
            Fragment::new(1_000, 2_300, "后面还有另外一个部分继续说".to_string()),
        ]
    );
}

/// Translated cues that the rules cannot split go to the external splitter,
/// with timing redistributed over the returned pieces
#[tokio::test]
async fn test_split_timed_cues_withSplitterResponse_shouldRedistributeInterval() {
    let text = "一二三四五六七八九十一二三四五六七八九十一二三四五六七八九十".to_string();
    let cues = vec![Fragment::new(0, 3_000, text.clone())];

    let mut script = HashMap::new();
    script.insert(
        text,
        "一二三四五六七八九十 ### 一二三四五六七八九十一二三四五六七八九十".to_string(),
    );
    let provider = MockSplitter::scripted(script);
    let config = SplitConfig::default();

    let track = split_timed_cues(&cues, &provider, &config).await.unwrap();

    assert_eq!(track.fragments.len(), 2);
    assert_eq!(track.fragments[0].start_ms, 0);
    assert_eq!(track.fragments[0].end_ms, 1_000);
    assert_eq!(track.fragments[1].start_ms, 1_000);
    assert_eq!(track.fragments[1].end_ms, 3_000);
}

/// Short cues pass through the translated path untouched
#[tokio::test]
async fn test_split_timed_cues_withShortCues_shouldPassThrough() {
    let cues = vec![
        Fragment::new(0, 500, "短句".to_string()),
        Fragment::new(500, 900, "还有一句".to_string()),
    ];

    let provider = MockSplitter::identity();
    let config = SplitConfig::default();

    let track = split_timed_cues(&cues, &provider, &config).await.unwrap();
    assert_eq!(track.fragments, cues);
    assert_eq!(provider.calls(), 0);
}
