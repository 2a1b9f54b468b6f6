//! Text-generation collaborator used for student summaries.
//!
//! The gateway only depends on the [`Summarizer`] trait: a prompt goes in,
//! plain text or a [`SummarizerError`] comes out. [`HttpSummarizer`] is the
//! production implementation, talking to an Ollama-style `/api/generate`
//! endpoint.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpSummarizer;

/// Failures surfaced by a summarization provider.
///
/// Callers treat every variant as "summary unavailable"; the variants only
/// exist to produce a useful message.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// The endpoint could not be reached or the connection failed.
    #[error("summarization endpoint unreachable: {0}")]
    Unavailable(String),

    /// The endpoint answered with a non-success status.
    #[error("summarization endpoint returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response was not JSON or had no text at the expected location.
    #[error("malformed summarization response: {0}")]
    InvalidResponse(String),

    /// The call did not finish within the configured deadline.
    #[error("summarization timed out after {0:?}")]
    TimedOut(Duration),
}

/// Prompt-to-text completion provider.
#[async_trait]
pub trait Summarizer: Send + Sync + std::fmt::Debug {
    /// Returns the completion text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`SummarizerError`] on transport failure, non-success
    /// status, or an unparseable payload.
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError>;
}
