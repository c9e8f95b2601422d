//! Redis queue backend.
//!
//! Uses a multiplexed connection manager so one connection is shared across
//! concurrent pipeline tasks; Redis serializes the RPUSH commands atomically.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::QueueBackend;
use crate::error::PipelineError;

/// Redis-backed queue over a shared multiplexed connection.
#[derive(Clone)]
pub struct RedisQueue {
    conn: ConnectionManager,
}

impl RedisQueue {
    /// Connect to the Redis instance at `url` (e.g. `redis://localhost:6379/0`).
    pub async fn connect(url: &str) -> Result<Self, PipelineError> {
        tracing::debug!("Connecting to queue backend at {url}");
        let client = redis::Client::open(url).map_err(|e| PipelineError::Connect {
            message: e.to_string(),
        })?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| PipelineError::Connect {
                message: e.to_string(),
            })?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl QueueBackend for RedisQueue {
    async fn rpush(&self, queue: &str, payload: String) -> Result<(), PipelineError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .rpush(queue, payload)
            .await
            .map_err(|e| PipelineError::Publish {
                queue: queue.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
