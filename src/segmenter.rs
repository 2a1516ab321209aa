use crate::caption_parser::Token;

// @module: Punctuation-based sentence segmentation

/// Tail time appended to the last sentence, which has no following token to
/// borrow an end time from
pub const SENTENCE_TAIL_MS: u64 = 800;

/// A contiguous run of tokens between terminal-punctuation boundaries.
/// Sentences are replaced, never mutated, when split downstream.
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Ordered, non-empty token run
    pub tokens: Vec<Token>,

    /// Start of the first token in ms
    pub start_ms: u64,

    /// Start of the next sentence's first token, or the last token's start
    /// plus [`SENTENCE_TAIL_MS`] for the final sentence
    pub end_ms: u64,
}

impl Sentence {
    /// Canonical sentence text: tokens joined by single spaces. This is the
    /// source of truth used for matching against splitter output and must not
    /// be reformatted downstream.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of tokens in the sentence
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

fn ends_sentence(text: &str) -> bool {
    text.ends_with('.') || text.ends_with('!') || text.ends_with('?')
}

/// Group tokens into initial sentences.
///
/// Greedy single pass: the buffer is flushed whenever a token ends with
/// terminal punctuation or the stream ends. A stream with no punctuation
/// yields exactly one sentence; consecutive terminated tokens yield
/// single-token sentences, which is accepted behavior.
pub fn segment_sentences(tokens: Vec<Token>) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut buffer: Vec<Token> = Vec::new();

    let count = tokens.len();
    for (idx, token) in tokens.iter().enumerate() {
        buffer.push(token.clone());

        if ends_sentence(&token.text) || idx == count - 1 {
            let start_ms = buffer[0].start_ms;
            let end_ms = if idx < count - 1 {
                tokens[idx + 1].start_ms
            } else {
                token.start_ms + SENTENCE_TAIL_MS
            };

            sentences.push(Sentence {
                tokens: std::mem::take(&mut buffer),
                start_ms,
                end_ms,
            });
        }
    }

    sentences
}
