// ABOUTME: Error types for the staff directory scraper including ErrorCode enum and ScrapeError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of scrape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Status,
    Extract,
    Layout,
    Output,
    NoData,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Status => "bad status",
            ErrorCode::Extract => "extraction error",
            ErrorCode::Layout => "layout error",
            ErrorCode::Output => "output error",
            ErrorCode::NoData => "no data scraped",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for scrape operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staffdir: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error (transport failure: connect, read, oversize body).
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Status error for a response that arrived with a non-200 code.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self::with_code(
            ErrorCode::Status,
            url,
            op,
            Some(anyhow::anyhow!("HTTP status {}", status)),
        )
    }

    /// Create an Extract error.
    pub fn extract(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Extract, url, op, source)
    }

    /// Create a Layout error.
    pub fn layout(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::with_code(ErrorCode::Layout, String::new(), op, source)
    }

    /// Create an Output error.
    pub fn output(
        path: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Output, path, op, source)
    }

    /// Create a NoData error: nothing at all was visited, so there is nothing to write.
    pub fn no_data(op: impl Into<String>) -> Self {
        Self::with_code(
            ErrorCode::NoData,
            String::new(),
            op,
            Some(anyhow::anyhow!("no directory pages were found")),
        )
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is a Status error.
    pub fn is_status(&self) -> bool {
        self.code == ErrorCode::Status
    }

    /// Returns true if this is an Extract error.
    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::Extract
    }

    /// Returns true if this is a Layout error.
    pub fn is_layout(&self) -> bool {
        self.code == ErrorCode::Layout
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a NoData error.
    pub fn is_no_data(&self) -> bool {
        self.code == ErrorCode::NoData
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_and_code() {
        let err = ScrapeError::status("https://example.com/staff", "Fetch", 503);
        assert_eq!(
            err.to_string(),
            "staffdir: Fetch https://example.com/staff: bad status: HTTP status 503"
        );
        assert!(err.is_status());
    }

    #[test]
    fn display_omits_empty_url() {
        let err = ScrapeError::no_data("Run");
        assert_eq!(
            err.to_string(),
            "staffdir: Run: no data scraped: no directory pages were found"
        );
        assert!(err.is_no_data());
    }

    #[test]
    fn layout_error_has_no_url() {
        let err = ScrapeError::layout("CompileLayout", None);
        assert!(err.url.is_empty());
        assert!(err.is_layout());
        assert!(!err.is_fetch());
    }
}
