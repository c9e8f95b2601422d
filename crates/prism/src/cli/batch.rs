//! The `prism batch` command: fixed-size batch resize and publish.

use std::path::PathBuf;

use clap::Args;
use prism_core::{Config, Pipeline};

use crate::manifest;

/// Arguments for the `batch` command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// TSV manifest of id<TAB>url rows
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Number of images per published batch (0 requests no batching)
    #[arg(short, long, default_value = "0")]
    pub batch_size: usize,

    /// Batch queue name (overrides config)
    #[arg(long)]
    pub queue: Option<String>,
}

/// Execute the batch command.
pub async fn execute(args: BatchArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(queue) = args.queue {
        config.queue.batch_queue = queue;
    }

    if args.batch_size == 0 {
        // Zero means "no batching requested": no image is processed.
        tracing::warn!("batch size is 0 — no images will be processed");
        println!("{}", serde_json::json!({"ok": "Processing Images"}));
        return Ok(());
    }

    let records = manifest::read_manifest(&args.manifest)?;
    tracing::info!(
        "Batching {} image record(s) into groups of {}",
        records.len(),
        args.batch_size
    );

    let pipeline = Pipeline::connect(config).await?;
    let published = pipeline.batch_predict(records, args.batch_size).await?;
    tracing::info!("Published {published} batch(es)");

    println!("{}", serde_json::json!({"ok": "Processing Images"}));

    Ok(())
}
