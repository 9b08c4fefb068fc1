//! HTTP client types for storefront catalog access.
//!
//! # Overview
//!
//! - [`ProductsClient`]: fetches and decodes a single `/products.json` page
//! - [`FetchError`]: how a page fetch can fail
//! - [`PAGE_LIMIT`]: products requested per page
//!
//! # Status Handling
//!
//! - **404**: [`FetchError::NotFound`]
//! - **429**: [`FetchError::RateLimited`]; the fetch loop waits and retries the same page
//! - **Other non-2xx**: [`FetchError::HttpStatus`] with the code and reason phrase
//!
//! The client itself never retries; see [`crate::Fetcher`].

mod errors;
mod http_client;

pub use errors::FetchError;
pub use http_client::{ProductsClient, PAGE_LIMIT};
