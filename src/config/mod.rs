//! Configuration types for the scraper.
//!
//! # Overview
//!
//! - [`ScraperConfig`]: request and pacing settings for a scrape
//! - [`ScraperConfigBuilder`]: a builder for constructing [`ScraperConfig`] instances
//! - [`StoreUrl`]: a normalized storefront base URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use shopify_scraper::ScraperConfig;
//!
//! let config = ScraperConfig::builder()
//!     .page_delay(Duration::from_millis(500))
//!     .max_rate_limit_retries(20)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_rate_limit_retries(), Some(20));
//! ```

mod newtypes;

pub use newtypes::StoreUrl;

use std::time::Duration;

use crate::error::ConfigError;

/// Browser-like User-Agent sent with every request by default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Default pause between two full pages.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Default pause after an HTTP 429 before retrying the same page.
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(10);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one scrape run.
///
/// # Thread Safety
///
/// `ScraperConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScraperConfig {
    page_delay: Duration,
    rate_limit_wait: Duration,
    max_rate_limit_retries: Option<u32>,
    timeout: Duration,
    user_agent: String,
}

impl ScraperConfig {
    /// Creates a new builder for constructing a `ScraperConfig`.
    #[must_use]
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::new()
    }

    /// Returns the pause between two full pages.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Returns the pause after an HTTP 429 response.
    #[must_use]
    pub const fn rate_limit_wait(&self) -> Duration {
        self.rate_limit_wait
    }

    /// Returns the cap on consecutive 429 retries for one page.
    ///
    /// `None` means the same page is retried for as long as the store keeps
    /// answering 429.
    #[must_use]
    pub const fn max_rate_limit_retries(&self) -> Option<u32> {
        self.max_rate_limit_retries
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            page_delay: DEFAULT_PAGE_DELAY,
            rate_limit_wait: DEFAULT_RATE_LIMIT_WAIT,
            max_rate_limit_retries: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// Verify ScraperConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ScraperConfig>();
};

/// Builder for constructing [`ScraperConfig`] instances.
///
/// # Defaults
///
/// - `page_delay`: 1 second
/// - `rate_limit_wait`: 10 seconds
/// - `max_rate_limit_retries`: `None` (unbounded)
/// - `timeout`: 30 seconds
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
#[derive(Debug, Default)]
pub struct ScraperConfigBuilder {
    page_delay: Option<Duration>,
    rate_limit_wait: Option<Duration>,
    max_rate_limit_retries: Option<u32>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ScraperConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pause between two full pages.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Sets the pause after an HTTP 429 response.
    #[must_use]
    pub const fn rate_limit_wait(mut self, wait: Duration) -> Self {
        self.rate_limit_wait = Some(wait);
        self
    }

    /// Caps the number of consecutive 429 retries for a single page.
    #[must_use]
    pub const fn max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the [`ScraperConfig`], validating the supplied values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if `timeout` is zero or
    /// `user_agent` is blank.
    pub fn build(self) -> Result<ScraperConfig, ConfigError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(ScraperConfig {
            page_delay: self.page_delay.unwrap_or(DEFAULT_PAGE_DELAY),
            rate_limit_wait: self.rate_limit_wait.unwrap_or(DEFAULT_RATE_LIMIT_WAIT),
            max_rate_limit_retries: self.max_rate_limit_retries,
            timeout,
            user_agent,
        })
    }
}

/// Converts a number of seconds given on the command line into a [`Duration`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSetting`] if `secs` is negative, NaN or
/// too large to represent.
pub fn duration_from_secs(field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidSetting {
        field,
        reason: format!("{secs} is not a usable number of seconds ({e})"),
    })
}
