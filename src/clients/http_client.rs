//! HTTP client for a storefront's public product catalog.
//!
//! This module provides the [`ProductsClient`] type, which fetches a single
//! page of `/products.json` and classifies the outcome. Pacing and retries
//! belong to [`crate::Fetcher`].

use std::collections::HashMap;

use crate::clients::errors::FetchError;
use crate::config::{ScraperConfig, StoreUrl};
use crate::products::ProductsPage;

/// Products requested per page (the endpoint's maximum).
pub const PAGE_LIMIT: usize = 250;

/// HTTP client for one storefront's `/products.json` endpoint.
///
/// The client handles:
/// - Page URL construction from the normalized [`StoreUrl`]
/// - Default headers (browser-like User-Agent, `Accept: application/json`)
/// - The per-request timeout
/// - Mapping status codes and bodies onto [`FetchError`]
///
/// # Example
///
/// ```rust,ignore
/// use shopify_scraper::{ProductsClient, ScraperConfig, StoreUrl};
///
/// let store = StoreUrl::new("example.myshopify.com")?;
/// let client = ProductsClient::new(store, &ScraperConfig::default())?;
///
/// let page = client.fetch_page(1).await?;
/// println!("{} products on page 1", page.products.len());
/// ```
#[derive(Debug)]
pub struct ProductsClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The normalized store base URL.
    store: StoreUrl,
    /// Headers included in every request.
    default_headers: HashMap<String, String>,
}

// Verify ProductsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProductsClient>();
};

impl ProductsClient {
    /// Creates a new client for the given store.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(store: StoreUrl, config: &ScraperConfig) -> Result<Self, FetchError> {
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            store,
            default_headers,
        })
    }

    /// Returns the store this client talks to.
    #[must_use]
    pub const fn store(&self) -> &StoreUrl {
        &self.store
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the URL requested for `page`.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        self.store.products_url(PAGE_LIMIT, page)
    }

    /// Fetches one page of products.
    ///
    /// Pages are numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if:
    /// - The store answers 404 (`NotFound`)
    /// - The store answers 429 (`RateLimited`)
    /// - Any other non-2xx status is received (`HttpStatus`)
    /// - The request or body read fails (`Network`)
    /// - The body is not a valid products page (`MalformedResponse`)
    pub async fn fetch_page(&self, page: u32) -> Result<ProductsPage, FetchError> {
        let url = self.page_url(page);
        tracing::debug!("GET {}", url);

        let mut req_builder = self.client.get(&url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder.send().await?;
        let status = res.status();

        match status.as_u16() {
            404 => return Err(FetchError::NotFound { url }),
            429 => return Err(FetchError::RateLimited { page }),
            _ if !status.is_success() => {
                return Err(FetchError::HttpStatus {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                });
            }
            _ => {}
        }

        let body_text = res.text().await?;
        Ok(serde_json::from_str(&body_text)?)
    }
}
