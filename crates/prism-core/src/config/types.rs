//! Sub-configuration structs with pipeline defaults.

use serde::{Deserialize, Serialize};

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// User-Agent header for outbound requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: format!("prism/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Max simultaneously in-flight fetch operations
    pub workers: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { workers: 2 }
    }
}

/// Resize target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
        }
    }
}

/// Outbound queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Backend connection URL
    pub url: String,

    /// Queue receiving per-image info messages
    pub info_queue: String,

    /// Queue receiving batch messages
    pub batch_queue: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379/0".to_string(),
            info_queue: "queue:images".to_string(),
            batch_queue: "queue:batch".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
