/*!
 * Error types for the subsplit library.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing caption payloads
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The payload matched neither supported caption shape
    #[error("Unsupported caption format: {0}")]
    UnsupportedFormat(String),

    /// The payload was not valid JSON
    #[error("Failed to parse caption payload: {0}")]
    Parse(String),
}

/// Errors that can occur when calling the external text splitter
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Errors that can occur when mapping split text back onto timed tokens
#[derive(Error, Debug)]
pub enum AlignError {
    /// A segment normalized to nothing, so it cannot be matched
    #[error("Segment is empty after normalization: {0:?}")]
    EmptySegment(String),

    /// No contiguous token window matched the segment
    #[error("No token window matches segment: {0:?}")]
    NoMatch(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from caption parsing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error from a splitter provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from span realignment
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    /// The whole task exceeded its wall-clock budget
    #[error("Task timed out after {0} ms")]
    TaskTimedOut(u64),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
