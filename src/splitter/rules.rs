//! Rule-based pre-split for translated text.
//!
//! Upstream machine translation tends to leave spaces between clauses of CJK
//! text. Before paying for an external splitter call, long cues are split at
//! whitespace runs that sit between two CJK characters, recursively, as long
//! as both sides keep a minimum length.

/// Minimum length of each side of a rule-based split, in chars
const MIN_PIECE_CHARS: usize = 6;

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Split `text` at whitespace between CJK characters, recursively.
///
/// Text at or under `max_chars` is returned whole. Splits are only taken when
/// both sides keep at least [`MIN_PIECE_CHARS`] characters; text with no
/// qualifying split point is returned whole regardless of length.
pub fn rule_split(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        let ws_start = i;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }

        let split_here = ws_start > 0
            && i < chars.len()
            && is_cjk(chars[ws_start - 1])
            && is_cjk(chars[i]);
        if !split_here {
            continue;
        }

        let left: String = chars[..ws_start].iter().collect();
        let right: String = chars[i..].iter().collect();
        if left.chars().count() >= MIN_PIECE_CHARS && right.chars().count() >= MIN_PIECE_CHARS {
            let mut pieces = vec![left];
            pieces.extend(rule_split(&right, max_chars));
            return pieces;
        }
    }

    vec![text.to_string()]
}
