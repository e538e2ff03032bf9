use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tenderscope_config::{ConfigLoader, telemetry};
use tenderscope_core::filter::{decode_query, encode_query};
use tenderscope_core::suggest::{SuggestionIndex, rank_with_tiers};

#[derive(Parser)]
#[command(name = "tenderscope-probe", about = "Inspect engine configuration, ranking and URL canonicalisation")]
struct Cli {
    /// Directory searched for tenderscope.toml / config/tenderscope.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration and where it came from
    Config,
    /// Rank a query against a newline-delimited corpus file
    Rank {
        query: String,
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long, default_value_t = 0)]
        min_chars: usize,
        /// Defaults to the configured suggestion limit
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode an address-bar query string and print its canonical form
    Canonical { query: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(telemetry::DEFAULT_FILTER)?;

    let load = ConfigLoader::new()
        .root(&cli.root)
        .load()
        .context("failed to load engine configuration")?;

    match cli.command {
        Command::Config => {
            println!("# source: {:?}", load.source);
            if load.env_file_loaded {
                println!("# .env loaded");
            }
            println!("{}", serde_json::to_string_pretty(&load.config)?);
        }
        Command::Rank {
            query,
            corpus,
            min_chars,
            limit,
        } => {
            let contents = fs::read_to_string(&corpus)
                .with_context(|| format!("failed to read corpus {}", corpus.display()))?;
            let index: SuggestionIndex = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();

            let limit = limit.unwrap_or(load.config.suggestion_limit);
            let ranked = rank_with_tiers(&query, &index, min_chars);
            if ranked.is_empty() {
                println!("no matches");
            }
            for (value, tier) in ranked.into_iter().take(limit) {
                println!("{}\t{value}", tier.number());
            }
        }
        Command::Canonical { query } => {
            let filter = decode_query(&query, load.config.page_size);
            let canonical = encode_query(&filter);
            println!("{}", if canonical.is_empty() { "(empty)" } else { &canonical });
            println!("{}", serde_json::to_string_pretty(&filter)?);
        }
    }

    Ok(())
}
