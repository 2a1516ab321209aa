/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock splitters that simulate different behaviors:
 * - `MockSplitter::identity()` - returns every sentence unchanged
 * - `MockSplitter::scripted(..)` - returns preset results per sentence
 * - `MockSplitter::failing()` - always fails with an error
 * - `MockSplitter::truncated(n)` - drops the last `n` results
 * - `MockSplitter::slow(ms)` - delays before answering (for timeout tests)
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::SplitProvider;

/// Behavior mode for the mock splitter
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return every sentence unchanged
    Identity,
    /// Return the scripted result for known sentences, unchanged otherwise
    Scripted(HashMap<String, String>),
    /// Always fail with a request error
    Failing,
    /// Return a response missing the last `n` entries
    Truncated(usize),
    /// Delay before answering, then behave as identity
    Slow { delay_ms: u64 },
}

/// Mock splitter for testing dispatcher behavior
#[derive(Debug)]
pub struct MockSplitter {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls received
    call_count: Arc<AtomicUsize>,
}

impl MockSplitter {
    /// Create a new mock splitter with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that returns every sentence unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Mock with preset results keyed by exact sentence text
    pub fn scripted(results: HashMap<String, String>) -> Self {
        Self::new(MockBehavior::Scripted(results))
    }

    /// Mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that drops the last `n` entries from each response
    pub fn truncated(missing: usize) -> Self {
        Self::new(MockBehavior::Truncated(missing))
    }

    /// Mock that sleeps before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of split calls received so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SplitProvider for MockSplitter {
    async fn split_sentences(&self, sentences: &[String]) -> Result<Vec<String>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Identity => Ok(sentences.to_vec()),
            MockBehavior::Scripted(map) => Ok(sentences
                .iter()
                .map(|s| map.get(s).cloned().unwrap_or_else(|| s.clone()))
                .collect()),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock splitter is configured to fail".to_string(),
            )),
            MockBehavior::Truncated(missing) => {
                let keep = sentences.len().saturating_sub(*missing);
                Ok(sentences[..keep].to_vec())
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(sentences.to_vec())
            }
        }
    }
}
