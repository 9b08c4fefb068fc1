//! Error types for fetching catalog pages.
//!
//! [`FetchError`] is the taxonomy the fetch loop works with:
//!
//! - [`FetchError::NotFound`]: the store has no public `/products.json`
//! - [`FetchError::RateLimited`]: HTTP 429, recovered by waiting and retrying
//! - [`FetchError::HttpStatus`]: any other non-2xx response
//! - [`FetchError::Network`]: DNS, connection, timeout or body read failure
//! - [`FetchError::MalformedResponse`]: the body is not the expected JSON
//!
//! Every variant except `RateLimited` ends the fetch loop.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_scraper::clients::FetchError;
//!
//! match client.fetch_page(1).await {
//!     Ok(page) => println!("{} products", page.products.len()),
//!     Err(FetchError::RateLimited { page }) => println!("slow down on page {page}"),
//!     Err(e) => println!("giving up: {e}"),
//! }
//! ```

use thiserror::Error;

/// Unified error type for fetching a page of products.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 404: the store does not exist or hides its catalog.
    #[error("Store not found or products.json not accessible: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// HTTP 429: the store asked us to slow down.
    #[error("Rate limited while fetching page {page}")]
    RateLimited {
        /// The page that was rejected.
        page: u32,
    },

    /// Any other non-successful HTTP status.
    #[error("HTTP Error {code}: {reason}")]
    HttpStatus {
        /// The HTTP status code.
        code: u16,
        /// The canonical reason phrase for the status.
        reason: String,
    },

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid JSON response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The configured cap on consecutive 429 retries was reached.
    #[error("Still rate limited on page {page} after {retries} retries")]
    RateLimitRetriesExhausted {
        /// The page that kept being rejected.
        page: u32,
        /// How many retries were spent.
        retries: u32,
    },

    /// The HTTP client itself could not be built.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Returns `true` if this error ends the fetch loop.
    ///
    /// Only [`FetchError::RateLimited`] is recoverable.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::RateLimited { .. })
    }
}
