//! The `prism info` command: synchronous image metadata extraction.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use prism_core::{Config, MemoryQueue, Pipeline};

use crate::manifest;

/// Arguments for the `info` command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// TSV manifest of id<TAB>url rows
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Number of parallel workers (overrides config)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Execute the info command.
pub async fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(workers) = args.workers {
        anyhow::ensure!(workers > 0, "--workers must be > 0");
        config.dispatch.workers = workers;
    }

    let records = manifest::read_manifest(&args.manifest)?;
    tracing::info!("Processing {} image record(s)", records.len());

    // Info mode never touches the outbound queue; run over the in-process
    // backend instead of connecting to Redis.
    let pipeline = Pipeline::new(config, Arc::new(MemoryQueue::new()))?;
    let results = pipeline.images_info(records).await;

    // BTreeMap for stable, id-ordered output.
    let ordered: BTreeMap<_, _> = results.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&ordered)?);

    Ok(())
}
