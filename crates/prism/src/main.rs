//! Prism CLI - Image fetch/transform/batch pipeline with queue publishing.
//!
//! Prism reads a TSV manifest of (id, url) image records and either prints
//! per-image metadata, publishes metadata messages to the info queue, or
//! resizes images into fixed-size batches on the batch queue.
//!
//! # Usage
//!
//! ```bash
//! # Print image metadata for every record
//! prism info images.tsv
//!
//! # Push per-image metadata messages to the info queue
//! prism publish images.tsv
//!
//! # Push fixed-size resized batches to the batch queue
//! prism batch images.tsv --batch-size 4
//!
//! # View configuration
//! prism config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod manifest;

/// Prism - Image fetch/transform/batch pipeline with queue publishing.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch each image and print its metadata as a JSON mapping
    Info(cli::info::InfoArgs),

    /// Fetch each image and push its metadata to the info queue
    Publish(cli::publish::PublishArgs),

    /// Resize images into fixed-size batches on the batch queue
    Batch(cli::batch::BatchArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match prism_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `prism config path`."
            );
            prism_core::Config::default()
        }
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Info(args) => cli::info::execute(args).await,
        Commands::Publish(args) => cli::publish::execute(args).await,
        Commands::Batch(args) => cli::batch::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
