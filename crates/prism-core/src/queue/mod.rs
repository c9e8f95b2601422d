//! Outbound queue publishing.
//!
//! The queue is an external FIFO list structure supporting an atomic append;
//! [`QueuePublisher`] serializes payloads to JSON strings and right-pushes
//! them onto named lists. FIFO order is the backend's: the first item pushed
//! is the first available via a pop from the left.

mod memory;
mod redis;

pub use self::memory::MemoryQueue;
pub use self::redis::RedisQueue;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::PipelineError;

/// An external FIFO list store supporting atomic append to a named list.
///
/// Implementations must serialize concurrent appends themselves (the standard
/// behavior of a list-append primitive); the pipeline performs no additional
/// locking around calls.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Append a serialized payload to the right end of `queue`.
    async fn rpush(&self, queue: &str, payload: String) -> Result<(), PipelineError>;
}

/// Serializes payloads and appends them to named queues.
///
/// Publishing is fire-and-forget beyond the backend's write confirmation:
/// there is no transactionality across pushes, and a failed push does not
/// roll back prior ones.
#[derive(Clone)]
pub struct QueuePublisher {
    backend: Arc<dyn QueueBackend>,
}

impl QueuePublisher {
    pub fn new(backend: Arc<dyn QueueBackend>) -> Self {
        Self { backend }
    }

    /// Serialize `payload` as JSON and right-push it onto `queue`.
    pub async fn publish<T: Serialize>(
        &self,
        queue: &str,
        payload: &T,
    ) -> Result<(), PipelineError> {
        let body = serde_json::to_string(payload)?;
        self.backend.rpush(queue, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: u32,
        name: String,
    }

    #[tokio::test]
    async fn test_publish_serializes_and_preserves_fifo_order() {
        let backend = Arc::new(MemoryQueue::new());
        let publisher = QueuePublisher::new(backend.clone());

        publisher
            .publish(
                "queue:test",
                &Payload {
                    id: 1,
                    name: "first".into(),
                },
            )
            .await
            .unwrap();
        publisher
            .publish(
                "queue:test",
                &Payload {
                    id: 2,
                    name: "second".into(),
                },
            )
            .await
            .unwrap();

        let first: Payload =
            serde_json::from_str(&backend.lpop("queue:test").unwrap()).unwrap();
        let second: Payload =
            serde_json::from_str(&backend.lpop("queue:test").unwrap()).unwrap();

        assert_eq!(first.name, "first");
        assert_eq!(second.name, "second");
        assert!(backend.lpop("queue:test").is_none());
    }

    #[tokio::test]
    async fn test_publish_to_distinct_queues_is_isolated() {
        let backend = Arc::new(MemoryQueue::new());
        let publisher = QueuePublisher::new(backend.clone());

        publisher.publish("queue:a", &1u32).await.unwrap();
        publisher.publish("queue:b", &2u32).await.unwrap();

        assert_eq!(backend.len("queue:a"), 1);
        assert_eq!(backend.len("queue:b"), 1);
        assert_eq!(backend.lpop("queue:a").unwrap(), "1");
        assert_eq!(backend.lpop("queue:b").unwrap(), "2");
    }
}
