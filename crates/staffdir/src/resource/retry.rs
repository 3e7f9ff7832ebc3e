// ABOUTME: Retrying page fetcher that turns a URL into a parsed DOM or an explicit "unavailable" result.
// ABOUTME: Transport errors wait a random delay before the next attempt; bad statuses retry immediately.

use std::thread;
use std::time::Duration;

use rand::Rng;
use scraper::Html;
use tracing::{debug, error, info, warn};

use crate::error::ScrapeError;
use crate::options::RetryOptions;
use crate::resource::Transport;

/// Fetches directory pages through a [`Transport`], retrying failed attempts.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    retry: RetryOptions,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, retry: RetryOptions) -> Self {
        Self { transport, retry }
    }

    /// Fetch `url` and parse it as an HTML document.
    ///
    /// Returns `None` once every attempt has failed; callers treat that as
    /// "page unavailable" and move on.
    pub fn fetch(&self, url: &str) -> Option<Html> {
        self.try_fetch(url).ok()
    }

    /// Like [`Fetcher::fetch`], but hands back the error from the last
    /// failed attempt.
    pub fn try_fetch(&self, url: &str) -> Result<Html, ScrapeError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;
        for attempt in 1..=attempts {
            match self.transport.get(url) {
                Ok(resp) if resp.status == 200 => {
                    if resp.final_url != url {
                        debug!(url, final_url = %resp.final_url, "followed redirect");
                    }
                    info!(url, attempt, "fetched successfully");
                    return Ok(Html::parse_document(&resp.text_utf8()));
                }
                Ok(resp) => {
                    let err = ScrapeError::status(url, "Fetch", resp.status);
                    warn!(url, attempt, error = %err, "received bad status, retrying");
                    last_error = Some(err);
                }
                Err(err) => {
                    warn!(url, attempt, error = %err, "error while fetching");
                    last_error = Some(err);
                    if attempt < attempts {
                        let delay = self.retry_delay();
                        info!(url, delay_secs = delay.as_secs_f64(), "retrying after delay");
                        thread::sleep(delay);
                    }
                }
            }
        }
        let err = last_error.unwrap_or_else(|| ScrapeError::fetch(url, "Fetch", None));
        error!(url, attempts, error = %err, "giving up on page");
        Err(err)
    }

    /// Uniform random delay between the configured bounds.
    fn retry_delay(&self) -> Duration {
        let lo = self.retry.delay_min.as_secs_f64();
        let hi = self.retry.delay_max.as_secs_f64().max(lo);
        let secs = rand::thread_rng().gen_range(lo..=hi);
        Duration::from_secs_f64(secs)
    }
}
