//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Master switch for the snapshot file.
    pub persistence_enabled: bool,

    /// Path of the JSON snapshot file.
    pub data_file: PathBuf,

    /// Upper bound in seconds for a whole HTTP request.
    pub request_timeout_secs: u64,

    /// Summarization collaborator settings.
    pub summarizer: SummarizerConfig,
}

/// Settings for the text-generation endpoint behind `/students/{id}/summary`.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Full URL of the generate endpoint.
    pub url: String,

    /// Model name sent with each request.
    pub model: String,

    /// JSON pointer (or dotted path) of the text in the response.
    pub response_pointer: String,

    /// Deadline in seconds for one summarization call.
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            response_pointer: "/response".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let persistence_enabled = parse_env_bool("PERSISTENCE_ENABLED", true);
        let data_file = std::env::var("STUDENTS_DATA_FILE")
            .map_or_else(|_| PathBuf::from("data/students.json"), PathBuf::from);
        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 60);

        let defaults = SummarizerConfig::default();
        let summarizer = SummarizerConfig {
            url: std::env::var("SUMMARIZER_URL").unwrap_or(defaults.url),
            model: std::env::var("SUMMARIZER_MODEL").unwrap_or(defaults.model),
            response_pointer: std::env::var("SUMMARIZER_RESPONSE_POINTER")
                .unwrap_or(defaults.response_pointer),
            timeout_secs: parse_env("SUMMARIZER_TIMEOUT_SECS", defaults.timeout_secs),
        };

        Ok(Self {
            listen_addr,
            persistence_enabled,
            data_file,
            request_timeout_secs,
            summarizer,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
