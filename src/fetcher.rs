//! The pagination loop over a store's `/products.json`.
//!
//! [`Fetcher::fetch_all`] requests pages 1, 2, 3, ... one at a time until the
//! catalog is exhausted or a request fails, and always hands back what it
//! collected so far.
//!
//! # Pacing
//!
//! - After every full page (250 products) the fetcher sleeps for the
//!   configured page delay before asking for the next page.
//! - On HTTP 429 it sleeps for the rate-limit wait and asks for the **same**
//!   page again. Without `max_rate_limit_retries` there is no cap.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_scraper::{Fetcher, ScraperConfig, StoreUrl};
//!
//! let store = StoreUrl::new("example.myshopify.com")?;
//! let fetcher = Fetcher::new(store, &ScraperConfig::default())?;
//!
//! let outcome = fetcher.fetch_all().await;
//! println!("{} products, stopped because: {}", outcome.products.len(), outcome.stop);
//! ```

use std::fmt;
use std::time::Duration;

use crate::clients::{FetchError, ProductsClient, PAGE_LIMIT};
use crate::config::{ScraperConfig, StoreUrl};
use crate::products::RawProduct;

/// Why the fetch loop ended.
#[derive(Debug)]
pub enum StopReason {
    /// A page came back with no products.
    EmptyPage,
    /// A page came back with fewer than [`PAGE_LIMIT`] products.
    PartialPage,
    /// A request failed; earlier pages are still kept.
    Failed(FetchError),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage => f.write_str("reached an empty page"),
            Self::PartialPage => f.write_str("reached the last page"),
            Self::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Request counters for one run of the fetch loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// HTTP requests sent, retries included.
    pub requests: u32,
    /// Pages that returned at least one product.
    pub pages: u32,
    /// Times the loop slept after an HTTP 429.
    pub rate_limit_waits: u32,
    /// Times the loop slept between two pages.
    pub page_delays: u32,
}

/// The result of [`Fetcher::fetch_all`].
#[derive(Debug)]
pub struct FetchOutcome {
    /// Every product collected, in storefront listing order.
    pub products: Vec<RawProduct>,
    /// Why the loop ended.
    pub stop: StopReason,
    /// Request counters.
    pub stats: FetchStats,
}

impl FetchOutcome {
    /// Returns the error that ended the loop, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match &self.stop {
            StopReason::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the loop walked the whole catalog.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error().is_none()
    }
}

/// Walks a store's catalog page by page.
#[derive(Debug)]
pub struct Fetcher {
    client: ProductsClient,
    page_delay: Duration,
    rate_limit_wait: Duration,
    max_rate_limit_retries: Option<u32>,
}

impl Fetcher {
    /// Creates a fetcher for `store` using the pacing in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be created.
    pub fn new(store: StoreUrl, config: &ScraperConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: ProductsClient::new(store, config)?,
            page_delay: config.page_delay(),
            rate_limit_wait: config.rate_limit_wait(),
            max_rate_limit_retries: config.max_rate_limit_retries(),
        })
    }

    /// Fetches every page of the catalog.
    ///
    /// Requests are strictly sequential. Failures never discard products
    /// already collected: they end the loop and are reported through
    /// [`FetchOutcome::stop`].
    pub async fn fetch_all(&self) -> FetchOutcome {
        let mut products: Vec<RawProduct> = Vec::new();
        let mut stats = FetchStats::default();
        let mut page: u32 = 1;
        let mut retries: u32 = 0;

        tracing::info!("Scraping products from: {}", self.client.store());

        let stop = loop {
            tracing::info!("Fetching page {}...", page);
            stats.requests += 1;

            let batch = match self.client.fetch_page(page).await {
                Ok(response) => response.products,
                Err(e) if !e.is_terminal() => {
                    if self.max_rate_limit_retries.is_some_and(|max| retries >= max) {
                        let exhausted = FetchError::RateLimitRetriesExhausted { page, retries };
                        tracing::error!("{}", exhausted);
                        break StopReason::Failed(exhausted);
                    }
                    retries += 1;
                    stats.rate_limit_waits += 1;
                    tracing::warn!(
                        "Rate limited. Waiting {} seconds...",
                        self.rate_limit_wait.as_secs_f64()
                    );
                    tokio::time::sleep(self.rate_limit_wait).await;
                    continue;
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    break StopReason::Failed(e);
                }
            };
            retries = 0;

            if batch.is_empty() {
                break StopReason::EmptyPage;
            }

            let found = batch.len();
            products.extend(batch);
            stats.pages += 1;
            tracing::info!("  Found {} products (Total: {})", found, products.len());

            if found < PAGE_LIMIT {
                break StopReason::PartialPage;
            }

            page += 1;
            stats.page_delays += 1;
            tokio::time::sleep(self.page_delay).await;
        };

        FetchOutcome {
            products,
            stop,
            stats,
        }
    }
}
