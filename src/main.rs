use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pharma_papers::filter::{filter_industry_papers, FilterStats};
use pharma_papers::pubmed::{fetch_papers, EutilsClient};
use pharma_papers::{write_csv, AffiliationClassifier};

/// Fetch PubMed papers with pharmaceutical/biotech company affiliations
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers with pharma/biotech affiliations and export as CSV", long_about = None)]
struct Cli {
    /// PubMed search query (full PubMed query syntax)
    query: String,

    /// Write the CSV to this file instead of stdout
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Print debug information during execution
    #[arg(short = 'd', long)]
    debug: bool,

    /// Maximum number of results to fetch
    #[arg(long, default_value_t = 100)]
    max_results: usize,

    /// Email address for NCBI API identification (recommended)
    #[arg(long)]
    email: Option<String>,

    /// NCBI API key for higher rate limits
    #[arg(long)]
    api_key: Option<String>,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    tracing::info!(query = %cli.query, "Starting PubMed search");

    let client = EutilsClient::new(cli.email, cli.api_key)?;
    let papers = fetch_papers(&client, &cli.query, cli.max_results).await?;
    tracing::info!(count = papers.len(), "Fetched papers");

    let classifier = AffiliationClassifier::default();
    let filtered = filter_industry_papers(&classifier, papers);
    if filtered.is_empty() {
        tracing::warn!("No papers with pharma/biotech affiliations found");
    } else {
        tracing::info!(count = filtered.len(), "Papers with industry affiliations");
    }

    if cli.debug {
        let stats = FilterStats::collect(&classifier, &filtered);
        tracing::debug!(?stats, "Filter statistics");
    }

    // The output file is only opened once filtering has succeeded, so a
    // fatal error earlier in the pipeline never leaves a partial CSV.
    match &cli.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_csv(&classifier, &filtered, file)?;
            tracing::info!(path = %path.display(), "Results saved");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_csv(&classifier, &filtered, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
