//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that
//! normalize and validate their contents on construction.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A normalized storefront base URL.
///
/// Accepts either a bare domain or a full URL and normalizes it to a base
/// URL that `/products.json` can be appended to.
///
/// # Normalization
///
/// - Surrounding whitespace is trimmed
/// - `https://` is prefixed when the input has no `http://` or `https://` scheme
/// - Trailing slashes are stripped
///
/// # Example
///
/// ```rust
/// use shopify_scraper::StoreUrl;
///
/// let store = StoreUrl::new("example.myshopify.com/").unwrap();
/// assert_eq!(store.as_ref(), "https://example.myshopify.com");
///
/// let store = StoreUrl::new("http://localhost:8080").unwrap();
/// assert_eq!(store.as_ref(), "http://localhost:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreUrl {
    url: String,
}

impl StoreUrl {
    const SCHEMES: [&'static str; 2] = ["http://", "https://"];

    /// Creates a new normalized store URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreUrl`] if the input is empty or has
    /// no host after the scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();

        let has_scheme = Self::SCHEMES.iter().any(|scheme| {
            trimmed
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        });
        let url = if has_scheme {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let url = url.trim_end_matches('/').to_string();

        // Stripping slashes can eat the separator of a bare "https://"
        let host_start = url
            .find("://")
            .map(|i| i + 3)
            .ok_or_else(|| ConfigError::InvalidStoreUrl { url: raw.clone() })?;

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidStoreUrl { url: raw });
        }

        Ok(Self { url })
    }

    /// Returns the URL of the `/products.json` endpoint for one page.
    ///
    /// ```rust
    /// use shopify_scraper::StoreUrl;
    ///
    /// let store = StoreUrl::new("shop.example.com").unwrap();
    /// assert_eq!(
    ///     store.products_url(250, 2),
    ///     "https://shop.example.com/products.json?limit=250&page=2"
    /// );
    /// ```
    #[must_use]
    pub fn products_url(&self, limit: usize, page: u32) -> String {
        format!("{}/products.json?limit={limit}&page={page}", self.url)
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
