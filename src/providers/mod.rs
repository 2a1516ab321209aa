/*!
 * Provider implementations for the external long-text splitter.
 *
 * This module contains client implementations for the text segmentation
 * service the pipeline calls to split overly long sentences:
 * - OpenAI: OpenAI-compatible chat completions API
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Literal marker the splitter inserts at proposed split points
pub const SEPARATOR: &str = "###";

/// Common trait for all splitter providers
///
/// The provider receives the ordered batch of sentence texts and must return
/// an equal-length ordered list where each result is either the original text
/// unchanged or the original text with `###` separators inserted. Stripping
/// the separators and re-joining must reproduce the input modulo whitespace;
/// the provider never alters, reorders, adds, or removes words.
#[async_trait]
pub trait SplitProvider: Send + Sync + Debug {
    /// Split a batch of sentences
    ///
    /// # Arguments
    /// * `sentences` - The ordered sentence texts to process
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - The ordered results, or an error
    async fn split_sentences(&self, sentences: &[String]) -> Result<Vec<String>, ProviderError>;
}

pub mod mock;
pub mod openai;
