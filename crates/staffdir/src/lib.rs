// ABOUTME: Main library entry point for the staff directory scraper.
// ABOUTME: Re-exports the public API: DirectoryScraper, ScraperBuilder, StaffRecord, Harvest, ScrapeError, layouts.

//! staffdir - scrapes paginated school staff directories into CSV.
//!
//! A run walks each directory's pages in order, reads one [`StaffRecord`]
//! per staff teaser, drops records with any missing field, and writes the
//! rest to a CSV file.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use staffdir::{DirectoryScraper, ScrapeError};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let scraper = DirectoryScraper::builder().build()?;
//!     let summary = scraper.run(
//!         &["https://isd110.org/our-schools/laketown-elementary/staff-directory"],
//!         Path::new("staff_directory.csv"),
//!     )?;
//!     println!("{} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```

pub mod directory;
pub mod error;
pub mod extractors;
pub mod layout;
pub mod options;
pub mod output;
pub mod pagination;
pub mod record;
pub mod resource;

#[cfg(test)]
mod test_support;

pub use crate::directory::{DirectoryScraper, RunSummary};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::RecordExtractor;
pub use crate::layout::{load_builtin_layout, CompiledLayout, DirectoryLayout};
pub use crate::options::{Options, RetryOptions, ScraperBuilder, DEFAULT_MAX_ATTEMPTS};
pub use crate::output::{to_csv_string, write_csv_file, write_records, DEFAULT_OUTPUT};
pub use crate::record::{Harvest, StaffRecord, CSV_HEADERS};
pub use crate::resource::{Fetcher, HttpTransport, RawResponse, Transport};

/// Directory scraped when no URL is given.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://isd110.org/our-schools/laketown-elementary/staff-directory";
