//! In-process queue backend.
//!
//! Holds FIFO lists in process memory behind the same [`QueueBackend`] seam
//! as the Redis backend. Used by tests and by commands that never touch the
//! outbound queue.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::QueueBackend;
use crate::error::PipelineError;

/// FIFO lists held in process memory.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest payload from `queue`.
    pub fn lpop(&self, queue: &str) -> Option<String> {
        self.lists
            .lock()
            .expect("memory queue lock poisoned")
            .get_mut(queue)
            .and_then(VecDeque::pop_front)
    }

    /// Number of payloads currently in `queue`.
    pub fn len(&self, queue: &str) -> usize {
        self.lists
            .lock()
            .expect("memory queue lock poisoned")
            .get(queue)
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl QueueBackend for MemoryQueue {
    async fn rpush(&self, queue: &str, payload: String) -> Result<(), PipelineError> {
        self.lists
            .lock()
            .expect("memory queue lock poisoned")
            .entry(queue.to_string())
            .or_default()
            .push_back(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rpush_then_lpop_is_fifo() {
        let queue = MemoryQueue::new();
        queue.rpush("q", "a".into()).await.unwrap();
        queue.rpush("q", "b".into()).await.unwrap();

        assert_eq!(queue.len("q"), 2);
        assert_eq!(queue.lpop("q").as_deref(), Some("a"));
        assert_eq!(queue.lpop("q").as_deref(), Some("b"));
        assert_eq!(queue.lpop("q"), None);
    }

    #[test]
    fn test_lpop_on_unknown_queue_is_none() {
        let queue = MemoryQueue::new();
        assert_eq!(queue.lpop("nope"), None);
        assert_eq!(queue.len("nope"), 0);
    }
}
