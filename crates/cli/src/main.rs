// ABOUTME: CLI for scraping school staff directories into a CSV file.
// ABOUTME: Parses arguments, configures tracing, and runs the staffdir scraper over the given directory URLs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use staffdir::{
    DirectoryLayout, DirectoryScraper, DEFAULT_DIRECTORY_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT,
};
use tracing::{debug, info};

/// Scrape staff directory listings (name, title, phone, email, school address) into CSV.
#[derive(Parser, Debug)]
#[command(name = "staffdir")]
#[command(about = "Scrape paginated school staff directories into a CSV file", long_about = None)]
struct Args {
    /// Staff directory base URL(s). Defaults to the Laketown Elementary directory.
    #[arg()]
    urls: Vec<String>,

    /// Output CSV path (overwritten on every run).
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON file describing the directory's selectors (default: builtin ISD 110 layout).
    #[arg(long = "layout")]
    layout: Option<PathBuf>,

    /// Attempts per page before giving up.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Lower bound, in seconds, of the random wait after a network error.
    #[arg(long = "retry-delay-min", default_value_t = 1.0)]
    retry_delay_min: f64,

    /// Upper bound, in seconds, of the random wait after a network error.
    #[arg(long = "retry-delay-max", default_value_t = 5.0)]
    retry_delay_max: f64,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Override the User-Agent header.
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_tracing(args: &Args) {
    // RUST_LOG wins over the flags
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("{} must be a non-negative number of seconds", flag))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);
    debug!(?args, "CLI arguments parsed");

    let urls = if args.urls.is_empty() {
        vec![DEFAULT_DIRECTORY_URL.to_string()]
    } else {
        args.urls.clone()
    };

    let mut builder = DirectoryScraper::builder()
        .timeout(Duration::from_secs(args.timeout))
        .max_attempts(args.max_attempts)
        .retry_delay(
            seconds(args.retry_delay_min, "--retry-delay-min")?,
            seconds(args.retry_delay_max, "--retry-delay-max")?,
        );
    if let Some(path) = &args.layout {
        let layout = DirectoryLayout::from_path(path)
            .with_context(|| format!("failed to load layout {}", path.display()))?;
        builder = builder.layout(layout);
    }
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    let scraper = builder.build()?;
    let summary = scraper.run(&urls, &args.output)?;

    info!(
        pages = summary.pages_visited,
        rows = summary.rows_written,
        dropped = summary.rows_dropped,
        output = %summary.output.display(),
        "done"
    );
    Ok(())
}
