//! Error types for configuration and output handling.
//!
//! Fetch failures live in [`crate::clients::FetchError`]; this module holds
//! the errors raised before a scrape starts (bad store URL, bad settings) and
//! after it ends (writing the output file).
//!
//! # Example
//!
//! ```rust
//! use shopify_scraper::{ConfigError, StoreUrl};
//!
//! let result = StoreUrl::new("   ");
//! assert!(matches!(result, Err(ConfigError::InvalidStoreUrl { .. })));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building the scraper configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Store URL is empty or has no host.
    #[error("Invalid store URL '{url}'. Expected a domain like 'example.myshopify.com' or a full URL like 'https://shop.example.com'.")]
    InvalidStoreUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A setting has a value the scraper cannot use.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidSetting {
        /// The name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors that can occur while writing the projected catalog to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output file could not be created or written.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The products could not be encoded as JSON.
    #[error("Failed to encode products as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
