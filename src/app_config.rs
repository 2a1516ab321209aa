/*!
 * Pipeline configuration.
 *
 * This module holds the tunable parameters of the split pipeline. All values
 * are supplied explicitly by the caller; nothing is read from the environment
 * or from global state.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the long-sentence split pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SplitConfig {
    /// Token count above which a sentence is considered long and sent to the
    /// external splitter
    #[serde(default = "default_long_sentence_threshold")]
    pub long_sentence_threshold: usize,

    /// Character count above which an already-translated cue is considered
    /// long (the translated path has no token timing, so it counts chars)
    #[serde(default = "default_long_cue_char_threshold")]
    pub long_cue_char_threshold: usize,

    /// Number of sentences sent to the splitter per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum number of concurrent splitter requests across one task
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Minimum duration of a rendered fragment in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Total wall-clock budget for one task in milliseconds; on expiry the
    /// task fails closed with no partial output
    #[serde(default = "default_task_timeout_ms")]
    pub task_timeout_ms: u64,
}

fn default_long_sentence_threshold() -> usize {
    100
}

fn default_long_cue_char_threshold() -> usize {
    20
}

fn default_batch_size() -> usize {
    10
}

fn default_max_concurrent_requests() -> usize {
    5
}

fn default_min_duration_ms() -> u64 {
    100
}

fn default_task_timeout_ms() -> u64 {
    600_000
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            long_sentence_threshold: default_long_sentence_threshold(),
            long_cue_char_threshold: default_long_cue_char_threshold(),
            batch_size: default_batch_size(),
            max_concurrent_requests: default_max_concurrent_requests(),
            min_duration_ms: default_min_duration_ms(),
            task_timeout_ms: default_task_timeout_ms(),
        }
    }
}

impl SplitConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.long_sentence_threshold == 0 {
            return Err(anyhow!("long_sentence_threshold must be greater than 0"));
        }

        if self.long_cue_char_threshold == 0 {
            return Err(anyhow!("long_cue_char_threshold must be greater than 0"));
        }

        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be greater than 0"));
        }

        if self.max_concurrent_requests == 0 {
            return Err(anyhow!("max_concurrent_requests must be greater than 0"));
        }

        if self.task_timeout_ms == 0 {
            return Err(anyhow!("task_timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Total task budget as a Duration
    pub fn task_timeout(&self) -> Duration {
        Duration::from_millis(self.task_timeout_ms)
    }
}
