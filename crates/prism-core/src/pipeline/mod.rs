//! Pipeline orchestration: fetch → transform → batch → publish.

mod batch;
mod dispatch;
mod fetch;
mod info;
mod resize;

pub use batch::BatchAccumulator;
pub use dispatch::Dispatcher;
pub use fetch::{format_tag, FetchedImage, ImageFetcher};
pub use info::ImageInfoExtractor;
pub use resize::ImageResizer;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::queue::{QueueBackend, QueuePublisher, RedisQueue};
use crate::types::{ImageInfoResult, ImageRecord};

/// The assembled pipeline: shared HTTP client, bounded dispatcher, and
/// outbound queue publisher.
///
/// The client is constructed once here and shared read-only across all
/// concurrent fetch tasks; the queue backend is injected so callers choose
/// between the Redis backend and the in-process one.
pub struct Pipeline {
    fetcher: ImageFetcher,
    resizer: ImageResizer,
    dispatcher: Dispatcher,
    publisher: QueuePublisher,
    config: Config,
}

impl Pipeline {
    /// Assemble a pipeline over an explicit queue backend.
    pub fn new(config: Config, backend: Arc<dyn QueueBackend>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.fetch.user_agent)
            .build()
            .map_err(|e| PipelineError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            fetcher: ImageFetcher::new(client, &config.fetch),
            resizer: ImageResizer::new(&config.resize),
            dispatcher: Dispatcher::new(&config.dispatch),
            publisher: QueuePublisher::new(backend),
            config,
        })
    }

    /// Assemble a pipeline connected to the configured Redis backend.
    pub async fn connect(config: Config) -> Result<Self> {
        let backend = RedisQueue::connect(&config.queue.url).await?;
        Self::new(config, Arc::new(backend))
    }

    /// Synchronous info mode: fetch every record and return one
    /// `ImageInfoResult` per distinct id.
    ///
    /// Fetch failures surface as that record's explicit error object; the
    /// mapping is complete regardless of individual outcomes.
    pub async fn images_info(&self, records: Vec<ImageRecord>) -> HashMap<i64, ImageInfoResult> {
        let fetcher = self.fetcher.clone();
        self.dispatcher
            .dispatch(
                records,
                move |record| {
                    let fetcher = fetcher.clone();
                    async move {
                        let fetched = fetcher.fetch(&record.url).await;
                        ImageInfoExtractor::to_result(&record.url, fetched)
                    }
                },
                |record| ImageInfoResult::failure(&record.url, "Image processing failed."),
            )
            .await
    }

    /// Asynchronous info mode: push `{"<id>": result}` to the info queue as
    /// each record completes.
    ///
    /// Publish failures for individual items are logged and processing
    /// continues; there is no per-item feedback beyond the returned count of
    /// successfully published messages.
    pub async fn images_info_async(&self, records: Vec<ImageRecord>) -> usize {
        let fetcher = self.fetcher.clone();
        let publisher = self.publisher.clone();
        let queue = self.config.queue.info_queue.clone();

        let outcomes = self
            .dispatcher
            .dispatch(
                records,
                move |record| {
                    let fetcher = fetcher.clone();
                    let publisher = publisher.clone();
                    let queue = queue.clone();
                    async move {
                        let fetched = fetcher.fetch(&record.url).await;
                        let result = ImageInfoExtractor::to_result(&record.url, fetched);
                        // Single-entry map: the integer id becomes the JSON key.
                        let message = HashMap::from([(record.id, &result)]);
                        match publisher.publish(&queue, &message).await {
                            Ok(()) => true,
                            Err(e) => {
                                tracing::error!(
                                    "Failed to publish info result for id {}: {e}",
                                    record.id
                                );
                                false
                            }
                        }
                    }
                },
                |_| false,
            )
            .await;

        outcomes.into_values().filter(|published| *published).count()
    }

    /// Batch mode: resize records in arrival order into `batch_size` chunks
    /// and publish each full chunk to the batch queue.
    ///
    /// `batch_size == 0` means "no batching requested": nothing is processed
    /// and zero batches are published (see DESIGN.md). Returns the number of
    /// batches published.
    pub async fn batch_predict(
        &self,
        records: Vec<ImageRecord>,
        batch_size: usize,
    ) -> std::result::Result<usize, PipelineError> {
        if batch_size == 0 {
            tracing::warn!("batch_size is 0 — skipping all batch processing");
            return Ok(0);
        }

        BatchAccumulator::new(batch_size, self.resizer.target())
            .run(
                records,
                &self.fetcher,
                &self.resizer,
                &self.publisher,
                &self.config.queue.batch_queue,
            )
            .await
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
