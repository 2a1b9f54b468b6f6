//! HTTP summarization client for Ollama-compatible generate endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{Summarizer, SummarizerError};
use crate::config::SummarizerConfig;

/// Longest response body echoed back in a [`SummarizerError::Rejected`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Summarizer that POSTs `{"model", "prompt", "stream": false}` to a
/// generate endpoint and reads the completion from a JSON pointer.
///
/// The default pointer `/response` matches Ollama; providers that nest the
/// text (e.g. `/choices/0/text`) are handled by configuring the pointer.
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    http: Client,
    url: String,
    model: String,
    response_pointer: String,
}

impl HttpSummarizer {
    /// Creates a client for `url`.
    ///
    /// `timeout` bounds each request end to end.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Unavailable`] if the HTTP client cannot
    /// be constructed.
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        response_pointer: &str,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder()
            .user_agent(concat!("student-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizerError::Unavailable(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            url: url.into(),
            model: model.into(),
            response_pointer: normalize_pointer(response_pointer),
        })
    }

    /// Creates a client from the summarizer section of the gateway config.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Unavailable`] if the HTTP client cannot
    /// be constructed.
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizerError> {
        Self::new(
            config.url.clone(),
            config.model.clone(),
            &config.response_pointer,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn extract_text(&self, body: &str) -> Result<String, SummarizerError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| SummarizerError::InvalidResponse(format!("body is not JSON: {e}")))?;

        value
            .pointer(&self.response_pointer)
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                SummarizerError::InvalidResponse(format!(
                    "no text field at {}",
                    self.response_pointer
                ))
            })
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizerError::Unavailable(format!("request to {} timed out", self.url))
                } else {
                    SummarizerError::Unavailable(format!("failed to reach {}: {e}", self.url))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummarizerError::Unavailable(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(SummarizerError::Rejected {
                status: status.as_u16(),
                body: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        self.extract_text(&body)
    }
}

/// Turns `response` or `choices.0.text`-style keys into a JSON pointer.
fn normalize_pointer(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed.replace('.', "/"))
    }
}
