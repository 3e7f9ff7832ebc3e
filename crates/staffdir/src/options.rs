// ABOUTME: Configuration options for the scraper including retry settings, Options, and ScraperBuilder.
// ABOUTME: ScraperBuilder provides a fluent API for constructing DirectoryScraper instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::directory::DirectoryScraper;
use crate::error::ScrapeError;
use crate::layout::DirectoryLayout;

/// Total attempts per URL, the first request included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retry behavior for page fetches.
///
/// The random delay applies only after a transport error. A response with a
/// non-200 status is retried straight away.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    pub max_attempts: u32,
    pub delay_min: Duration,
    pub delay_max: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay_min: Duration::from_secs(1),
            delay_max: Duration::from_secs(5),
        }
    }
}

impl RetryOptions {
    /// Retry options with no delay between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
        }
    }
}

/// Configuration options for the directory scraper.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub retry: RetryOptions,
    pub layout: DirectoryLayout,
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("staffdir/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: HashMap::new(),
            retry: RetryOptions::default(),
            layout: DirectoryLayout::default(),
            http_client: None,
        }
    }
}

/// Builder for constructing DirectoryScraper instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ScraperBuilder {
    opts: Options,
}

impl ScraperBuilder {
    /// Create a new ScraperBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set the maximum number of attempts per URL (clamped to at least one).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.opts.retry.max_attempts = attempts.max(1);
        self
    }

    /// Set the bounds of the random delay applied after a transport error.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn retry_delay(mut self, min: Duration, max: Duration) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.opts.retry.delay_min = lo;
        self.opts.retry.delay_max = hi;
        self
    }

    /// Replace the retry settings wholesale.
    pub fn retry(mut self, retry: RetryOptions) -> Self {
        self.opts.retry = retry;
        self
    }

    /// Set the page layout used for enumeration and extraction.
    pub fn layout(mut self, layout: DirectoryLayout) -> Self {
        self.opts.layout = layout;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Borrow the options collected so far.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Build the scraper with the configured options.
    pub fn build(self) -> Result<DirectoryScraper, ScrapeError> {
        DirectoryScraper::new(self.opts)
    }
}

impl Default for ScraperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
