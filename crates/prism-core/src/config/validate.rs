//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.workers == 0 {
            return Err(ConfigError::ValidationError(
                "dispatch.workers must be > 0".into(),
            ));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "fetch.timeout_ms must be > 0".into(),
            ));
        }
        if self.resize.width == 0 {
            return Err(ConfigError::ValidationError(
                "resize.width must be > 0".into(),
            ));
        }
        if self.resize.height == 0 {
            return Err(ConfigError::ValidationError(
                "resize.height must be > 0".into(),
            ));
        }
        if self.queue.url.is_empty() {
            return Err(ConfigError::ValidationError("queue.url must be set".into()));
        }
        if self.queue.info_queue.is_empty() {
            return Err(ConfigError::ValidationError(
                "queue.info_queue must be set".into(),
            ));
        }
        if self.queue.batch_queue.is_empty() {
            return Err(ConfigError::ValidationError(
                "queue.batch_queue must be set".into(),
            ));
        }
        Ok(())
    }
}
