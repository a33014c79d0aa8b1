//! Lectern CLI - build corpus snapshots and run ranking queries locally.
//!
//! # Usage
//!
//! ```bash
//! # Build a corpus snapshot from raw course content
//! lectern index content.json
//!
//! # Rank a query against the snapshot
//! lectern query "how does photosynthesis work"
//! lectern query "recursion" --json
//! ```
//!
//! The CLI embeds with a deterministic local hashed-TF embedder, so the
//! snapshot it builds and the queries it runs share one vector space
//! without any external provider.

mod config;
mod embed;
mod index;
mod output;
mod query;
mod snapshot;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Local corpus tooling for the lectern retrieval engine.
#[derive(Parser)]
#[command(name = "lectern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a corpus snapshot from a raw content JSON file
    Index {
        /// Raw content items (JSON array of {id, content, moduletype, moduleid})
        input: PathBuf,

        /// Snapshot file to write (default: platform data directory)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Rank a query against a corpus snapshot
    Query {
        /// Query text
        query: String,

        /// Snapshot file to read (default: platform data directory)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Index { input, corpus } => {
            let written = index::run(&input, corpus.as_deref()).await?;
            println!(
                "Indexed {} chunks into {}",
                written.chunk_count,
                written.path.display()
            );
        }
        Commands::Query {
            query,
            corpus,
            json,
        } => {
            let results = query::run(&query, corpus.as_deref()).await?;
            let rendered = if json {
                output::format_json(&query, &results)
            } else {
                output::format_human(&query, &results)
            };
            println!("{}", rendered);
        }
    }

    Ok(())
}
