//! Error types for the Prism image pipeline.
//!
//! Fetch failures are recovered locally inside the pipeline stages and
//! converted into per-record results; they never cross the dispatcher as a
//! crash. Only configuration and queue-level faults propagate upward.

use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Terminal outcome of a single fetch-and-decode attempt.
///
/// One attempt per invocation, no retries. The info path surfaces these as an
/// explicit `error` field via [`FetchError::user_message`]; the resize path
/// swallows them into the zero-array sentinel.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("request for {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Transport failure, non-success status, or empty body
    #[error("request for {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// Non-empty success body that could not be decoded as an image
    #[error("decode failed for {url}: {message}")]
    DecodeFailed { url: String, message: String },
}

impl FetchError {
    /// The fixed message surfaced in the info path's `error` field.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Timeout { .. } => "Image request timed out.",
            FetchError::RequestFailed { .. } => "Image could not be requested.",
            FetchError::DecodeFailed { .. } => "Image could not be opened.",
        }
    }
}

/// Pipeline-level errors: HTTP client assembly and queue connectivity.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// HTTP client construction failed
    #[error("HTTP client construction failed: {message}")]
    Client { message: String },

    /// Queue backend connection failed
    #[error("Queue connection failed: {message}")]
    Connect { message: String },

    /// A payload could not be appended to the named queue
    #[error("Failed to publish to queue {queue}: {message}")]
    Publish { queue: String, message: String },

    /// A payload could not be serialized for publishing
    #[error("Failed to serialize queue payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_per_variant() {
        let timeout = FetchError::Timeout {
            url: "u".into(),
            timeout_ms: 10_000,
        };
        let request = FetchError::RequestFailed {
            url: "u".into(),
            message: "HTTP 404".into(),
        };
        let decode = FetchError::DecodeFailed {
            url: "u".into(),
            message: "bad bytes".into(),
        };

        assert_eq!(timeout.user_message(), "Image request timed out.");
        assert_eq!(request.user_message(), "Image could not be requested.");
        assert_eq!(decode.user_message(), "Image could not be opened.");
    }

    #[test]
    fn test_fetch_error_display_carries_context() {
        let err = FetchError::RequestFailed {
            url: "https://example.com/a.gif".into(),
            message: "HTTP 404".into(),
        };
        let text = err.to_string();
        assert!(text.contains("https://example.com/a.gif"));
        assert!(text.contains("HTTP 404"));
    }
}
