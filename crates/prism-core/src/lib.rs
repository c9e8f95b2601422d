//! Prism Core - Embeddable image fetch/transform/batch pipeline library.
//!
//! Prism ingests (id, URL) image records, retrieves each image over HTTP,
//! and either extracts metadata or produces fixed-size pixel arrays, emitting
//! results as a direct mapping or as messages on an outbound FIFO queue.
//!
//! # Architecture
//!
//! ```text
//! Records → Dispatch (bounded fan-out) → Fetch → Info or Resize
//!                                               ↘ result map | queue messages | batches
//! ```
//!
//! Every record's operation runs under a semaphore-bounded task pool with
//! per-item failure isolation: one bad image never aborts its siblings.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::{Config, ImageRecord, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let pipeline = Pipeline::connect(config).await?;
//!
//!     let records = vec![ImageRecord::new(0, "https://example.com/a.gif")];
//!     let results = pipeline.images_info(records).await;
//!     println!("{}", serde_json::to_string_pretty(&results)?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FetchError, PipelineError, PrismError, Result};
pub use pipeline::{
    BatchAccumulator, Dispatcher, ImageFetcher, ImageInfoExtractor, ImageResizer, Pipeline,
};
pub use queue::{MemoryQueue, QueueBackend, QueuePublisher, RedisQueue};
pub use types::{Batch, ImageInfo, ImageInfoResult, ImageRecord, PixelArray, ResizedImage};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
