use log::error;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AlignError;
use crate::segmenter::Sentence;

// @module: Mapping split text back onto timed tokens

// @const: Normalization regex, strips everything but word chars and whitespace
static TOKEN_CLEAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// An inclusive token index range within one sentence, used transiently to
/// recover timing for split text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First token index
    pub start: usize,
    /// Last token index (inclusive)
    pub end: usize,
}

/// Normalize a token for matching: lowercase, strip non-alphanumerics
pub fn normalize(text: &str) -> String {
    TOKEN_CLEAN.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Map ordered text segments onto contiguous token spans of the sentence.
///
/// The pointer into the token list only moves forward: segments are a
/// left-to-right partition of the original text, so spans must be in order,
/// non-overlapping, and never move backward. For each segment, the shortest
/// window of consecutive normalized tokens whose space-joined concatenation
/// exactly equals the segment's normalized words wins. The splitter contract
/// guarantees segment boundaries fall on unaltered word boundaries, so exact
/// equality is the match criterion.
///
/// A segment with no matching window is an error: the caller must fall back
/// to the unsplit sentence and never partially apply spans.
pub fn align_segments(sentence: &Sentence, segments: &[String]) -> Result<Vec<Span>, AlignError> {
    let words_clean: Vec<String> = sentence
        .tokens
        .iter()
        .map(|t| normalize(&t.text))
        .collect();

    let mut ptr = 0;
    let mut spans = Vec::with_capacity(segments.len());

    for segment in segments {
        let target = segment
            .split_whitespace()
            .map(normalize)
            .collect::<Vec<_>>()
            .join(" ");

        if target.is_empty() {
            return Err(AlignError::EmptySegment(segment.clone()));
        }

        let mut found = None;
        'search: for i in ptr..words_clean.len() {
            for j in i..words_clean.len() {
                let joined = words_clean[i..=j].join(" ");
                if joined == target {
                    found = Some(Span { start: i, end: j });
                    break 'search;
                }
                // The join only grows, so once it outruns the target no
                // longer window at this start can match
                if joined.len() > target.len() {
                    break;
                }
            }
        }

        match found {
            Some(span) => {
                spans.push(span);
                ptr = span.end + 1;
            }
            None => {
                error!(
                    "Failed to align segment {:?} against tokens from index {}: {:?}",
                    target,
                    ptr,
                    &words_clean[ptr.min(words_clean.len())..]
                );
                return Err(AlignError::NoMatch(segment.clone()));
            }
        }
    }

    Ok(spans)
}
