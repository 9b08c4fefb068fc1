//! # Shopify Storefront Scraper
//!
//! Fetches the full product catalog of a Shopify storefront from its public
//! `/products.json` endpoint and flattens each product into a reduced schema.
//!
//! ## Overview
//!
//! - [`StoreUrl`]: normalizes a bare domain or full URL into a store base URL
//! - [`ScraperConfig`]: page delay, rate-limit wait, timeout and User-Agent
//! - [`Fetcher`]: walks `/products.json?limit=250&page=N` until the catalog ends
//! - [`ProjectedProduct::from_raw`]: maps a raw record onto the output schema
//! - [`output::write_products`]: writes the projected catalog as pretty JSON
//! - [`CatalogSummary`]: product, vendor and product-type counts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopify_scraper::{project_all, Fetcher, ScraperConfig, StoreUrl};
//!
//! let store = StoreUrl::new("example.myshopify.com")?;
//! let fetcher = Fetcher::new(store, &ScraperConfig::default())?;
//!
//! let outcome = fetcher.fetch_all().await;
//! let products = project_all(&outcome.products);
//! shopify_scraper::output::write_products("products.json".as_ref(), &products)?;
//! ```
//!
//! ## Failure Model
//!
//! A failed request ends the fetch loop but never discards the pages already
//! collected. HTTP 429 is the one recoverable failure: the fetcher waits and
//! retries the same page.

pub mod clients;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod products;
pub mod summary;

pub use clients::{FetchError, ProductsClient, PAGE_LIMIT};
pub use config::{ScraperConfig, ScraperConfigBuilder, StoreUrl};
pub use error::{ConfigError, OutputError};
pub use fetcher::{FetchOutcome, FetchStats, Fetcher, StopReason};
pub use products::{
    project_all, Price, ProjectedProduct, ProjectedVariant, RawImage, RawProduct, RawTags,
    RawVariant,
};
pub use summary::CatalogSummary;
