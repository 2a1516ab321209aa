use log::warn;

use crate::segmenter::Sentence;
use crate::splitter::align::Span;
use crate::subtitle_renderer::Fragment;

// @module: Timing recovery for split text

/// Convert aligned token spans into timed fragments.
///
/// A fragment starts at its first token's timestamp. It ends one millisecond
/// before the next fragment starts, floored so every fragment keeps at least
/// `min_duration_ms`; the last fragment inherits the sentence's original end
/// time. An empty span list yields the whole sentence as a single fragment.
pub fn spans_to_fragments(
    sentence: &Sentence,
    spans: &[Span],
    min_duration_ms: u64,
) -> Vec<Fragment> {
    if spans.is_empty() {
        return vec![Fragment::new(sentence.start_ms, sentence.end_ms, sentence.text())];
    }

    let mut fragments = Vec::with_capacity(spans.len());
    for (i, span) in spans.iter().enumerate() {
        let seg_tokens = &sentence.tokens[span.start..=span.end];
        let text = seg_tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let start_ms = seg_tokens[0].start_ms;

        let end_ms = if i + 1 < spans.len() {
            let next_start = sentence.tokens[spans[i + 1].start].start_ms;
            (next_start.saturating_sub(1)).max(start_ms + min_duration_ms)
        } else {
            sentence.end_ms
        };

        fragments.push(Fragment::new(start_ms, end_ms, text));
    }

    fragments
}

/// Allocate a known time interval across text segments that carry no
/// token-level timing, proportionally to character count.
///
/// Durations are computed over a running fractional clock so consecutive
/// fragments stay contiguous; the final fragment ends exactly at `end_ms`.
/// Zero total characters yields no fragments and a warning, never an error.
pub fn redistribute_interval(start_ms: u64, end_ms: u64, segments: &[String]) -> Vec<Fragment> {
    let total_chars: usize = segments.iter().map(|s| s.chars().count()).sum();
    if total_chars == 0 {
        warn!("Redistributing over zero total characters, producing no fragments");
        return Vec::new();
    }

    let total_ms = end_ms.saturating_sub(start_ms) as f64;
    let per_char_ms = total_ms / total_chars as f64;

    let mut fragments = Vec::with_capacity(segments.len());
    let mut clock = start_ms as f64;

    for (i, segment) in segments.iter().enumerate() {
        let duration = segment.chars().count() as f64 * per_char_ms;
        let seg_start = clock.round() as u64;
        clock += duration;

        let seg_end = if i + 1 == segments.len() {
            end_ms
        } else {
            clock.round() as u64
        };

        fragments.push(Fragment::new(seg_start, seg_end, segment.clone()));
    }

    fragments
}
