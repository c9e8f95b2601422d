//! Batch accumulation: fixed-size grouping with trailing-remainder discard.

use crate::error::PipelineError;
use crate::queue::QueuePublisher;
use crate::types::{Batch, ImageRecord, ResizedImage};

use super::fetch::ImageFetcher;
use super::resize::ImageResizer;

/// Groups a stream of records into consecutive fixed-size batches.
///
/// Batch membership is determined purely by arrival order within
/// `batch_size`, never by content; a resize failure contributes its sentinel
/// to the chunk like any other image. Callers must not construct this with a
/// zero batch size: `batch_size == 0` means "no batching requested" and is
/// handled by the orchestrator before the accumulator is ever built.
pub struct BatchAccumulator {
    batch_size: usize,
    width: u32,
    height: u32,
}

impl BatchAccumulator {
    pub fn new(batch_size: usize, target: (u32, u32)) -> Self {
        Self {
            batch_size,
            width: target.0,
            height: target.1,
        }
    }

    /// Consume `records` in order, resize each, and publish every full chunk
    /// of `batch_size` images to `queue`.
    ///
    /// The trailing partial chunk is discarded: never flushed, never
    /// published. A publish failure aborts the run and surfaces as a single
    /// pipeline-level error. Returns the number of batches published.
    pub async fn run(
        &self,
        records: impl IntoIterator<Item = ImageRecord>,
        fetcher: &ImageFetcher,
        resizer: &ImageResizer,
        publisher: &QueuePublisher,
        queue: &str,
    ) -> Result<usize, PipelineError> {
        let mut pending: Vec<ResizedImage> = Vec::with_capacity(self.batch_size);
        let mut published = 0usize;

        for record in records {
            let fetched = fetcher.fetch(&record.url).await;
            pending.push(resizer.from_fetch(fetched));

            if pending.len() == self.batch_size {
                let chunk = std::mem::replace(&mut pending, Vec::with_capacity(self.batch_size));
                publisher.publish(queue, &self.seal(chunk)).await?;
                published += 1;
            }
        }

        if !pending.is_empty() {
            tracing::debug!(
                "Discarding trailing partial chunk of {} image(s)",
                pending.len()
            );
        }

        Ok(published)
    }

    /// Build the wire batch from one full chunk.
    ///
    /// The channel count in the descriptor comes from the last image in the
    /// chunk; channels are assumed uniform across the chunk, which holds only
    /// when no resize failed mid-chunk.
    fn seal(&self, chunk: Vec<ResizedImage>) -> Batch {
        let channels = chunk.last().map_or(0, |img| img.channels);
        Batch {
            batch_dimension: format!(
                "({}, {}, {}, {})",
                self.batch_size, channels, self.width, self.height
            ),
            images: chunk.into_iter().map(|img| img.pixels).collect(),
        }
    }
}
