/*!
 * Concurrent batched dispatch to the external splitter.
 *
 * This module partitions long texts into fixed-size batches, issues them
 * concurrently under a shared concurrency bound, and deterministically
 * reassembles ordered results even when individual batches fail.
 */

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, error, warn};
use tokio::sync::Semaphore;

use crate::app_config::SplitConfig;
use crate::providers::{SplitProvider, SEPARATOR};

/// Batch dispatcher for splitter requests
pub struct BatchSplitter<'a, P: SplitProvider + ?Sized> {
    /// The splitter provider to call
    provider: &'a P,

    /// Number of texts per request
    batch_size: usize,

    /// Concurrency bound shared by all batches of one task
    max_concurrent_requests: usize,
}

impl<'a, P: SplitProvider + ?Sized> BatchSplitter<'a, P> {
    /// Create a new batch dispatcher
    pub fn new(provider: &'a P, config: &SplitConfig) -> Self {
        Self {
            provider,
            batch_size: config.batch_size,
            max_concurrent_requests: config.max_concurrent_requests,
        }
    }

    /// Dispatch texts to the splitter and collect per-text segment lists.
    ///
    /// The returned vector is positionally aligned with `texts`: each entry is
    /// `Some(segments)` when the splitter produced a usable result, or `None`
    /// when that text must fall back to its unsplit form. Failures are
    /// contained per batch; a failed or short response never aborts sibling
    /// batches, and results are merged in input order after all futures
    /// complete.
    pub async fn split_texts(&self, texts: &[String]) -> Vec<Option<Vec<String>>> {
        if texts.is_empty() {
            return Vec::new();
        }

        let batches: Vec<Vec<String>> = texts
            .chunks(self.batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        let total_batches = batches.len();
        debug!(
            "Dispatching {} texts in {} batches (max {} concurrent)",
            texts.len(),
            total_batches,
            self.max_concurrent_requests
        );

        // One semaphore gates every batch of this task
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));

        let results = stream::iter(batches.into_iter().enumerate())
            .map(|(batch_index, batch)| {
                let semaphore = semaphore.clone();
                let provider = self.provider;

                async move {
                    // Closing the semaphore is not part of this design, so
                    // acquire can only fail if the runtime is shutting down
                    let Ok(_permit) = semaphore.acquire().await else {
                        return (batch_index, batch, Err(()));
                    };

                    debug!(
                        "Processing splitter batch {} of {} ({} texts)",
                        batch_index + 1,
                        total_batches,
                        batch.len()
                    );
                    let result = provider.split_sentences(&batch).await;

                    match result {
                        Ok(responses) => (batch_index, batch, Ok(responses)),
                        Err(e) => {
                            error!("Splitter batch {} failed: {}", batch_index + 1, e);
                            (batch_index, batch, Err(()))
                        }
                    }
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Reassemble in input order regardless of completion order
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(idx, _, _)| *idx);

        let mut merged: Vec<Option<Vec<String>>> = Vec::with_capacity(texts.len());
        for (batch_index, batch, result) in sorted_results {
            match result {
                Ok(responses) => {
                    if responses.len() != batch.len() {
                        warn!(
                            "Splitter batch {} returned {} results for {} texts, \
                             falling back to unsplit for the unmatched tail",
                            batch_index + 1,
                            responses.len(),
                            batch.len()
                        );
                    }

                    // Positional prefix only; no attempt is made to
                    // re-correlate a short response by content
                    for i in 0..batch.len() {
                        merged.push(responses.get(i).map(|r| parse_segments(r)));
                    }
                }
                Err(()) => {
                    merged.extend(std::iter::repeat_with(|| None).take(batch.len()));
                }
            }
        }

        merged
    }
}

/// Split a returned text on the separator, trimming and dropping empties
fn parse_segments(result: &str) -> Vec<String> {
    result
        .split(SEPARATOR)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
