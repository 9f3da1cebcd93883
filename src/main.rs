//! Quarry main entry point
//!
//! Command-line interface for crawling a site into a search index and
//! querying it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use quarry::config::{load_config_with_hash, Config};
use quarry::crawler::CrawlEngine;
use quarry::index::SearchIndex;
use quarry::search::{DictionaryCorrector, QueryPipeline};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quarry: crawl a single site and search its pages
///
/// `crawl` walks every page reachable within the starting URL's domain and
/// stores the text in a local index; `search` answers free-text queries
/// against that index, with fuzzy correction of misspelled terms.
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version)]
#[command(about = "Crawl a single site and search its pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl all in-domain pages reachable from a starting URL
    Crawl {
        /// Absolute URL to start from; its host[:port] bounds the crawl
        start_url: String,
    },

    /// Search the index with a free-text query
    Search {
        /// Query terms
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
            config
        }
        None => {
            tracing::debug!("No config file given, using defaults");
            Config::default()
        }
    };

    match cli.command {
        Command::Crawl { start_url } => handle_crawl(config, &start_url).await,
        Command::Search { query } => handle_search(config, &query.join(" ")),
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quarry=info,warn"),
            1 => EnvFilter::new("quarry=debug,info"),
            2 => EnvFilter::new("quarry=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl subcommand
async fn handle_crawl(config: Config, start_url: &str) -> anyhow::Result<()> {
    let mut index = SearchIndex::open(Path::new(&config.index.database_path))
        .with_context(|| format!("failed to open index at {}", config.index.database_path))?;

    let mut engine = CrawlEngine::new(&config.crawler, &mut index)?;
    let report = engine.crawl(start_url).await?;

    println!("Crawl finished: {}", report);
    Ok(())
}

/// Handles the search subcommand
fn handle_search(config: Config, query: &str) -> anyhow::Result<()> {
    let index = SearchIndex::open(Path::new(&config.index.database_path))
        .with_context(|| format!("failed to open index at {}", config.index.database_path))?;

    let corrector = DictionaryCorrector::from_index(&index, &config.spelling)?;
    if corrector.is_empty() {
        tracing::warn!("index vocabulary is empty, spelling correction is a no-op");
    } else {
        tracing::debug!("spelling dictionary built with {} terms", corrector.len());
    }
    let pipeline = QueryPipeline::new(&index, corrector);

    let hits = pipeline.search(query)?;

    if hits.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    println!("{} result(s) for \"{}\":\n", hits.len(), query);
    for (rank, hit) in hits.iter().enumerate() {
        println!("{:3}. [{:.3}] {}", rank + 1, hit.score, hit.url);
        println!("     {}", hit.title);
        println!("     {}", snippet(&hit.content, 160));
    }

    Ok(())
}

/// Truncates content to a short display snippet
fn snippet(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
