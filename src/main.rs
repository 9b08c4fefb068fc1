//! Command-line entry point.
//!
//! ```text
//! shopify-scraper <store_url> [output_file]
//! ```
//!
//! Exits with status 1 when the store URL is missing or invalid, when no
//! products were scraped, or when the output file cannot be written.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopify_scraper::config::duration_from_secs;
use shopify_scraper::output::{write_products, DEFAULT_OUTPUT_FILE};
use shopify_scraper::{project_all, CatalogSummary, ConfigError, Fetcher, ScraperConfig, StoreUrl};

/// Scrape every product from a Shopify storefront into a JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "shopify-scraper",
    version,
    after_help = "Example: shopify-scraper example.myshopify.com products.json"
)]
struct Cli {
    /// Store domain or URL (e.g. example.myshopify.com)
    store_url: String,

    /// Where to write the scraped products
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,

    /// Seconds to wait between pages
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// Seconds to wait after the store answers 429 Too Many Requests
    #[arg(long, default_value_t = 10.0)]
    rate_limit_wait: f64,

    /// Give up on a page after this many consecutive 429 responses (default: never)
    #[arg(long)]
    max_rate_limit_retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30.0)]
    timeout: f64,

    /// Override the browser-like User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Maps command-line flags onto a validated [`ScraperConfig`].
    fn scraper_config(&self) -> Result<ScraperConfig, ConfigError> {
        let mut builder = ScraperConfig::builder()
            .page_delay(duration_from_secs("delay", self.delay)?)
            .rate_limit_wait(duration_from_secs("rate_limit_wait", self.rate_limit_wait)?)
            .timeout(duration_from_secs("timeout", self.timeout)?);

        if let Some(retries) = self.max_rate_limit_retries {
            builder = builder.max_rate_limit_retries(retries);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build()
    }
}

/// Initialize logging based on verbosity flag. `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> ExitCode {
    let store = match StoreUrl::new(cli.store_url.as_str()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.scraper_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match Fetcher::new(store, &config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = fetcher.fetch_all().await;
    if outcome.products.is_empty() {
        tracing::error!("No products found.");
        return ExitCode::FAILURE;
    }
    if !outcome.is_complete() {
        tracing::warn!(
            "Stopped early ({}); keeping the {} products fetched so far",
            outcome.stop,
            outcome.products.len()
        );
    }

    let products = project_all(&outcome.products);
    if let Err(e) = write_products(&cli.output_file, &products) {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    let summary = CatalogSummary::from_products(&products);
    println!();
    println!("Scraped {} products", summary.products);
    println!("Saved to: {}", cli.output_file.display());
    println!();
    println!("{summary}");

    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Exit status is the only report left if stderr is gone
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.verbose);
    run(&cli).await
}
