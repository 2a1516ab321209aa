use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::CaptionError;

// @module: Timed-word caption parsing

/// A single timed unit of captioned text. Created once at parse time and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    // @field: Word text, trimmed, non-empty
    pub text: String,

    // @field: Absolute start time in ms
    pub start_ms: u64,
}

/// Caption wire encoding, declared by the caller along with the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Events with absolute start times carrying segments whose offsets are
    /// relative to the event's own start (not cumulative across events)
    EventBased,
    /// Flat word entries whose offsets are deltas from the previous
    /// cumulative timestamp
    WordBased,
}

/// One event in the event-based encoding
#[derive(Debug, Deserialize)]
struct CaptionEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,

    /// Set to 1 on pure line-break continuation events, which carry no words
    #[serde(rename = "aAppend")]
    append: Option<i64>,

    #[serde(default)]
    segs: Vec<CaptionSegment>,
}

/// One text segment within an event
#[derive(Debug, Deserialize)]
struct CaptionSegment {
    #[serde(default)]
    utf8: String,

    #[serde(rename = "tOffsetMs", default)]
    offset_ms: u64,
}

/// One entry in the word-based encoding. Different upstream producers name
/// the text field differently, so all known aliases are accepted.
#[derive(Debug, Deserialize)]
struct WordEntry {
    #[serde(default)]
    w: Option<String>,

    #[serde(default)]
    utf8: Option<String>,

    #[serde(default)]
    word: Option<String>,

    #[serde(rename = "tOffsetMs", default)]
    offset_ms: u64,
}

impl WordEntry {
    fn text(&self) -> &str {
        self.w
            .as_deref()
            .or(self.utf8.as_deref())
            .or(self.word.as_deref())
            .unwrap_or("")
    }
}

/// Parse a raw caption payload into a time-sorted token list.
///
/// The two encodings carry genuinely different offset conventions: event
/// segment offsets are relative to their event's start, while word entry
/// offsets are cumulative deltas. They are intentionally not unified.
pub fn parse_tokens(payload: &[u8], format: CaptionFormat) -> Result<Vec<Token>, CaptionError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| CaptionError::Parse(e.to_string()))?;

    let mut tokens = match format {
        CaptionFormat::EventBased => parse_events(&value)?,
        CaptionFormat::WordBased => parse_words(&value)?,
    };

    // Multi-event sources can interleave, so order is enforced here. The sort
    // must be stable: words legitimately share a timestamp.
    tokens.sort_by_key(|t| t.start_ms);

    debug!("Parsed {} caption tokens", tokens.len());
    Ok(tokens)
}

fn parse_events(value: &Value) -> Result<Vec<Token>, CaptionError> {
    let raw = value.get("events").ok_or_else(|| {
        CaptionError::UnsupportedFormat("payload has no 'events' array".to_string())
    })?;

    let events: Vec<CaptionEvent> =
        serde_json::from_value(raw.clone()).map_err(|e| CaptionError::Parse(e.to_string()))?;

    let mut tokens = Vec::new();
    for event in events {
        if event.append == Some(1) {
            continue;
        }

        // Rare, but events without a start time do occur
        let Some(event_start) = event.start_ms else {
            continue;
        };

        for seg in event.segs {
            let text = seg.utf8.trim();
            if text.is_empty() {
                continue;
            }

            tokens.push(Token {
                text: text.to_string(),
                start_ms: event_start + seg.offset_ms,
            });
        }
    }

    Ok(tokens)
}

fn parse_words(value: &Value) -> Result<Vec<Token>, CaptionError> {
    let raw = value.get("words").ok_or_else(|| {
        CaptionError::UnsupportedFormat("payload has no 'words' array".to_string())
    })?;

    let words: Vec<WordEntry> =
        serde_json::from_value(raw.clone()).map_err(|e| CaptionError::Parse(e.to_string()))?;

    let mut tokens = Vec::new();
    let mut clock_ms: u64 = 0;
    for entry in &words {
        let text = entry.text().trim();

        // Blank entries contribute neither text nor time
        if text.is_empty() {
            continue;
        }

        clock_ms += entry.offset_ms;

        tokens.push(Token {
            text: text.to_string(),
            start_ms: clock_ms,
        });
    }

    Ok(tokens)
}
