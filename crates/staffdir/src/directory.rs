// ABOUTME: DirectoryScraper ties fetching, page enumeration, extraction, and CSV output into one sequential run.
// ABOUTME: Records flow through an explicit Harvest accumulator, URLs-then-pages order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::extractors::RecordExtractor;
use crate::layout::CompiledLayout;
use crate::options::{Options, ScraperBuilder};
use crate::output::write_csv_file;
use crate::pagination::enumerate_pages;
use crate::record::{Harvest, StaffRecord};
use crate::resource::{Fetcher, HttpTransport, Transport};

/// Counts from one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_visited: usize,
    pub records_extracted: usize,
    pub rows_written: usize,
    pub rows_dropped: usize,
    pub output: PathBuf,
}

/// Scrapes staff directories page by page.
#[derive(Debug)]
pub struct DirectoryScraper<T = HttpTransport> {
    fetcher: Fetcher<T>,
    extractor: RecordExtractor,
}

impl DirectoryScraper<HttpTransport> {
    /// Create a new ScraperBuilder for configuring the scraper.
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::new()
    }

    /// Create a scraper over HTTP with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let transport = HttpTransport::new(&opts)?;
        Self::with_transport(transport, &opts)
    }
}

impl<T: Transport> DirectoryScraper<T> {
    /// Create a scraper that fetches through `transport`.
    pub fn with_transport(transport: T, opts: &Options) -> Result<Self, ScrapeError> {
        let layout = CompiledLayout::compile(&opts.layout)?;
        Ok(Self {
            fetcher: Fetcher::new(transport, opts.retry.clone()),
            extractor: RecordExtractor::new(layout),
        })
    }

    /// Page URLs for one directory; empty when nothing can be scraped.
    pub fn enumerate_pages(&self, base_url: &str) -> Vec<String> {
        enumerate_pages(&self.fetcher, self.extractor.layout(), base_url)
    }

    /// Records on one page; empty when the page is unavailable.
    pub fn scrape_page(&self, page_url: &str) -> Vec<StaffRecord> {
        match self.fetcher.fetch(page_url) {
            Some(doc) => self.extractor.extract(&doc),
            None => Vec::new(),
        }
    }

    /// Scrape every page of one directory into `harvest`.
    pub fn scrape_directory(&self, base_url: &str, harvest: Harvest) -> Harvest {
        info!(url = base_url, "scraping directory");
        self.enumerate_pages(base_url)
            .iter()
            .fold(harvest, |harvest, page_url| {
                harvest.with_page(self.scrape_page(page_url))
            })
    }

    /// Scrape every directory in order.
    pub fn scrape<S: AsRef<str>>(&self, base_urls: &[S]) -> Harvest {
        base_urls.iter().fold(Harvest::new(), |harvest, url| {
            self.scrape_directory(url.as_ref(), harvest)
        })
    }

    /// Scrape `base_urls`, drop incomplete records, and write the rest to `output`.
    ///
    /// Fails with a NoData error when no directory page was found at all.
    pub fn run<S: AsRef<str>>(&self, base_urls: &[S], output: &Path) -> Result<RunSummary, ScrapeError> {
        let harvest = self.scrape(base_urls);
        if harvest.pages_visited == 0 {
            return Err(ScrapeError::no_data("Run"));
        }

        for record in harvest.records.iter().filter(|r| !r.is_complete()) {
            debug!(?record, "dropping incomplete record");
        }
        let rows_dropped = harvest.incomplete_count();
        let rows = harvest.complete_records();
        let rows_written = write_csv_file(output, rows)?;
        info!(
            output = %output.display(),
            rows = rows_written,
            dropped = rows_dropped,
            "wrote staff directory"
        );

        Ok(RunSummary {
            pages_visited: harvest.pages_visited,
            records_extracted: harvest.records.len(),
            rows_written,
            rows_dropped,
            output: output.to_path_buf(),
        })
    }
}
