//! The `prism publish` command: asynchronous info mode over the outbound queue.

use std::path::PathBuf;

use clap::Args;
use prism_core::{Config, Pipeline};

use crate::manifest;

/// Arguments for the `publish` command.
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// TSV manifest of id<TAB>url rows
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Number of parallel workers (overrides config)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Info queue name (overrides config)
    #[arg(long)]
    pub queue: Option<String>,
}

/// Execute the publish command.
pub async fn execute(args: PublishArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(workers) = args.workers {
        anyhow::ensure!(workers > 0, "--workers must be > 0");
        config.dispatch.workers = workers;
    }
    if let Some(queue) = args.queue {
        config.queue.info_queue = queue;
    }

    let records = manifest::read_manifest(&args.manifest)?;
    tracing::info!("Publishing info for {} image record(s)", records.len());

    let pipeline = Pipeline::connect(config).await?;
    let published = pipeline.images_info_async(records).await;
    tracing::info!("Published {published} info message(s)");

    // Acknowledgment only: individual fetch failures are part of the queued
    // results, not of this response.
    println!("{}", serde_json::json!({"ok": "Processing Images"}));

    Ok(())
}
