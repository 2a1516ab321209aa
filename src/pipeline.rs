/*!
 * End-to-end split pipelines.
 *
 * Two entry points share the same batch dispatch machinery and differ only in
 * how timing is recovered for split text:
 *
 * - [`process_captions`]: parse timed tokens, segment into sentences, split
 *   long sentences via the external splitter, and realign each piece onto the
 *   original tokens for exact timing.
 * - [`split_timed_cues`]: the post-translation path, where token timing no
 *   longer exists; long cues are rule-split, then splitter-split, and timing
 *   is redistributed proportionally by character count.
 *
 * Both are wrapped in a total wall-clock timeout: on expiry the task fails
 * closed with no partial output, and in-flight splitter calls are abandoned.
 */

use std::collections::HashMap;

use log::{error, info, warn};
use tokio::time::timeout;

use crate::app_config::SplitConfig;
use crate::caption_parser::{parse_tokens, CaptionFormat};
use crate::errors::AppError;
use crate::providers::SplitProvider;
use crate::segmenter::{segment_sentences, Sentence};
use crate::splitter::rules::rule_split;
use crate::splitter::{align_segments, redistribute_interval, spans_to_fragments, BatchSplitter};
use crate::subtitle_renderer::{Fragment, SubtitleTrack};

/// Run the full caption split pipeline under the task timeout.
///
/// On timeout the task fails with [`AppError::TaskTimedOut`] and no fragments
/// are emitted.
pub async fn process_captions<P: SplitProvider + ?Sized>(
    payload: &[u8],
    format: CaptionFormat,
    provider: &P,
    config: &SplitConfig,
) -> Result<SubtitleTrack, AppError> {
    config.validate()?;

    match timeout(config.task_timeout(), run_caption_pipeline(payload, format, provider, config))
        .await
    {
        Ok(result) => result,
        Err(_) => {
            error!("Caption split task timed out after {} ms", config.task_timeout_ms);
            Err(AppError::TaskTimedOut(config.task_timeout_ms))
        }
    }
}

async fn run_caption_pipeline<P: SplitProvider + ?Sized>(
    payload: &[u8],
    format: CaptionFormat,
    provider: &P,
    config: &SplitConfig,
) -> Result<SubtitleTrack, AppError> {
    let tokens = parse_tokens(payload, format)?;
    info!("Parsed {} tokens", tokens.len());

    let sentences = segment_sentences(tokens);
    info!("Segmented into {} sentences", sentences.len());

    let long_indices: Vec<usize> = sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| s.word_count() > config.long_sentence_threshold)
        .map(|(i, _)| i)
        .collect();
    info!("{} sentences exceed the long-sentence threshold", long_indices.len());

    let long_texts: Vec<String> = long_indices.iter().map(|&i| sentences[i].text()).collect();
    let results = BatchSplitter::new(provider, config)
        .split_texts(&long_texts)
        .await;

    let mut split_map: HashMap<usize, Vec<Fragment>> = HashMap::new();
    for (&idx, result) in long_indices.iter().zip(results.iter()) {
        let Some(segments) = result else {
            continue;
        };
        if segments.len() < 2 {
            // Unchanged or unusable response, keep the original sentence
            continue;
        }

        match align_segments(&sentences[idx], segments) {
            Ok(spans) => {
                split_map.insert(
                    idx,
                    spans_to_fragments(&sentences[idx], &spans, config.min_duration_ms),
                );
            }
            Err(e) => {
                warn!("Realignment failed, keeping sentence unsplit: {}", e);
            }
        }
    }

    let mut fragments = Vec::new();
    for (i, sentence) in sentences.iter().enumerate() {
        match split_map.remove(&i) {
            Some(split) => fragments.extend(split),
            None => fragments.push(unsplit_fragment(sentence)),
        }
    }

    Ok(SubtitleTrack::assemble(fragments))
}

fn unsplit_fragment(sentence: &Sentence) -> Fragment {
    Fragment::new(sentence.start_ms, sentence.end_ms, sentence.text())
}

/// Split long translated cues and redistribute their timing, under the task
/// timeout.
///
/// Translated text carries no token-level timestamps, so each cue's known
/// interval is reallocated across its pieces by character count. Cues are
/// first split by the rule-based splitter; pieces still longer than the
/// character threshold go through the external splitter.
pub async fn split_timed_cues<P: SplitProvider + ?Sized>(
    cues: &[Fragment],
    provider: &P,
    config: &SplitConfig,
) -> Result<SubtitleTrack, AppError> {
    config.validate()?;

    match timeout(config.task_timeout(), run_translated_pipeline(cues, provider, config)).await {
        Ok(result) => result,
        Err(_) => {
            error!("Cue split task timed out after {} ms", config.task_timeout_ms);
            Err(AppError::TaskTimedOut(config.task_timeout_ms))
        }
    }
}

async fn run_translated_pipeline<P: SplitProvider + ?Sized>(
    cues: &[Fragment],
    provider: &P,
    config: &SplitConfig,
) -> Result<SubtitleTrack, AppError> {
    // Phase 1: rule-based split with proportional timing
    let mut initial: Vec<Fragment> = Vec::new();
    for cue in cues {
        let pieces = rule_split(&cue.text, config.long_cue_char_threshold);
        if pieces.len() > 1 {
            initial.extend(redistribute_interval(cue.start_ms, cue.end_ms, &pieces));
        } else {
            initial.push(cue.clone());
        }
    }
    info!(
        "Rule-based split turned {} cues into {} pieces",
        cues.len(),
        initial.len()
    );

    // Phase 2: external splitter for pieces still over the threshold
    let long_indices: Vec<usize> = initial
        .iter()
        .enumerate()
        .filter(|(_, f)| f.text.chars().count() > config.long_cue_char_threshold)
        .map(|(i, _)| i)
        .collect();
    info!("{} pieces sent to the external splitter", long_indices.len());

    let long_texts: Vec<String> = long_indices.iter().map(|&i| initial[i].text.clone()).collect();
    let results = BatchSplitter::new(provider, config)
        .split_texts(&long_texts)
        .await;

    let mut split_map: HashMap<usize, Vec<Fragment>> = HashMap::new();
    for (&idx, result) in long_indices.iter().zip(results.iter()) {
        let Some(segments) = result else {
            continue;
        };
        if segments.len() < 2 {
            continue;
        }

        let cue = &initial[idx];
        let split = redistribute_interval(cue.start_ms, cue.end_ms, segments);
        if !split.is_empty() {
            split_map.insert(idx, split);
        }
    }

    let mut fragments = Vec::new();
    for (i, cue) in initial.iter().enumerate() {
        match split_map.remove(&i) {
            Some(split) => fragments.extend(split),
            None => fragments.push(cue.clone()),
        }
    }

    Ok(SubtitleTrack::assemble(fragments))
}
