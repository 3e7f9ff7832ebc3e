// ABOUTME: Page enumeration for paginated staff directories.
// ABOUTME: Reads the last-page marker from the first page and expands it into every page URL.

use scraper::Html;
use tracing::{error, info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::extractors::fields::doc_attr;
use crate::layout::CompiledLayout;
use crate::resource::{Fetcher, Transport};

/// Largest last-page index accepted from a marker.
pub const MAX_PAGE_INDEX: u32 = 10_000;

/// Highest page index advertised by the page's last-page marker.
///
/// The marker href is resolved against `base_url` before its page parameter
/// is read. `Ok(None)` means the listing is not paginated: there is no
/// marker, or the marker link carries no page parameter. A page parameter
/// that is not a number, or exceeds [`MAX_PAGE_INDEX`], is an Extract error.
pub fn last_page_index(
    doc: &Html,
    layout: &CompiledLayout,
    base_url: &str,
) -> Result<Option<u32>, ScrapeError> {
    let Some(href) = doc_attr(doc, &layout.last_page_link, "href") else {
        return Ok(None);
    };
    let marker = Url::parse(base_url)
        .and_then(|base| base.join(&href))
        .map_err(|e| {
            ScrapeError::invalid_url(
                href.clone(),
                "LastPageIndex",
                Some(anyhow::anyhow!("cannot resolve marker against {}: {}", base_url, e)),
            )
        })?;
    let Some(raw) = marker
        .query_pairs()
        .find(|(key, value)| key == layout.page_param.as_str() && !value.is_empty())
        .map(|(_, value)| value.into_owned())
    else {
        return Ok(None);
    };

    let last = raw.trim().parse::<u32>().map_err(|e| {
        ScrapeError::extract(
            marker.as_str(),
            "LastPageIndex",
            Some(anyhow::anyhow!("page parameter {:?} is not a number: {}", raw, e)),
        )
    })?;
    if last > MAX_PAGE_INDEX {
        return Err(ScrapeError::extract(
            marker.as_str(),
            "LastPageIndex",
            Some(anyhow::anyhow!("page index {} exceeds limit {}", last, MAX_PAGE_INDEX)),
        ));
    }
    Ok(Some(last))
}

/// URLs for pages `0..=last`, each `base_url?s=&page=k`.
pub fn page_urls(base_url: &str, page_param: &str, last: u32) -> Vec<String> {
    (0..=last)
        .map(|k| format!("{}?s=&{}={}", base_url, page_param, k))
        .collect()
}

/// Page URLs to scrape for `base_url`.
///
/// Returns the base URL alone for an unpaginated listing and an empty list
/// when the first page cannot be fetched or its marker cannot be read.
pub fn enumerate_pages<T: Transport>(
    fetcher: &Fetcher<T>,
    layout: &CompiledLayout,
    base_url: &str,
) -> Vec<String> {
    let Some(doc) = fetcher.fetch(base_url) else {
        error!(url = base_url, "failed to fetch directory page, skipping");
        return Vec::new();
    };

    match last_page_index(&doc, layout, base_url) {
        Ok(Some(last)) => {
            info!(url = base_url, pages = last as u64 + 1, "found paginated directory");
            page_urls(base_url, &layout.page_param, last)
        }
        Ok(None) => {
            info!(url = base_url, "no pagination marker, single page directory");
            vec![base_url.to_string()]
        }
        Err(err) => {
            warn!(url = base_url, error = %err, "could not read pagination marker");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DirectoryLayout;
    use crate::options::RetryOptions;
    use crate::resource::RawResponse;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://isd110.org/our-schools/laketown-elementary/staff-directory";

    struct OnePage(Option<String>);

    impl Transport for OnePage {
        fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
            match &self.0 {
                Some(body) => Ok(RawResponse::html(200, url, body.clone())),
                None => Err(ScrapeError::fetch(url, "Fetch", None)),
            }
        }
    }

    fn layout() -> CompiledLayout {
        CompiledLayout::compile(&DirectoryLayout::default()).unwrap()
    }

    fn pager(last_href: &str) -> String {
        format!(
            r#"<html><body><nav><ul class="pager">
                <li class="item first"><a href="?s=&amp;page=0">First</a></li>
                <li class="item last"><a href="{}">Last</a></li>
            </ul></nav></body></html>"#,
            last_href
        )
    }

    fn enumerate(body: Option<String>) -> Vec<String> {
        let fetcher = Fetcher::new(OnePage(body), RetryOptions::immediate(2));
        enumerate_pages(&fetcher, &layout(), BASE)
    }

    #[test]
    fn no_marker_returns_base_url_only() {
        let pages = enumerate(Some("<html><body><p>one page</p></body></html>".into()));
        assert_eq!(pages, vec![BASE.to_string()]);
    }

    #[test]
    fn marker_expands_to_every_page_inclusive() {
        let pages = enumerate(Some(pager("?s=&amp;page=3")));
        assert_eq!(
            pages,
            vec![
                format!("{}?s=&page=0", BASE),
                format!("{}?s=&page=1", BASE),
                format!("{}?s=&page=2", BASE),
                format!("{}?s=&page=3", BASE),
            ]
        );
    }

    #[test]
    fn marker_with_page_zero_gives_one_page() {
        let pages = enumerate(Some(pager("/staff-directory?s=&amp;page=0")));
        assert_eq!(pages, vec![format!("{}?s=&page=0", BASE)]);
    }

    #[test]
    fn marker_without_page_param_returns_base_url() {
        let pages = enumerate(Some(pager("/staff-directory?s=")));
        assert_eq!(pages, vec![BASE.to_string()]);
    }

    #[test]
    fn non_numeric_page_is_empty() {
        assert!(enumerate(Some(pager("?s=&amp;page=last"))).is_empty());
    }

    #[test]
    fn fetch_failure_is_empty() {
        assert!(enumerate(None).is_empty());
    }

    #[test]
    fn last_page_index_reads_marker() {
        let doc = Html::parse_document(&pager("https://isd110.org/x?s=&amp;page=12"));
        assert_eq!(last_page_index(&doc, &layout(), BASE).unwrap(), Some(12));
    }

    #[test]
    fn relative_marker_is_resolved_against_base() {
        let doc = Html::parse_document(&pager("../laketown-elementary/staff-directory?s=&amp;page=4#pager"));
        assert_eq!(last_page_index(&doc, &layout(), BASE).unwrap(), Some(4));

        let doc = Html::parse_document(&pager("?page=2&amp;s="));
        assert_eq!(last_page_index(&doc, &layout(), BASE).unwrap(), Some(2));
    }

    #[test]
    fn non_numeric_marker_is_extract_error() {
        let doc = Html::parse_document(&pager("?s=&amp;page=last"));
        let err = last_page_index(&doc, &layout(), BASE).unwrap_err();
        assert!(err.is_extract());
    }

    #[test]
    fn page_index_above_limit_is_rejected() {
        let doc = Html::parse_document(&pager("?s=&amp;page=4294967295"));
        assert!(last_page_index(&doc, &layout(), BASE).unwrap_err().is_extract());
        assert!(enumerate(Some(pager("?s=&amp;page=4294967295"))).is_empty());

        let at_limit = format!("?s=&amp;page={}", MAX_PAGE_INDEX);
        let doc = Html::parse_document(&pager(&at_limit));
        assert_eq!(last_page_index(&doc, &layout(), BASE).unwrap(), Some(MAX_PAGE_INDEX));
    }

    #[test]
    fn page_urls_count_is_last_plus_one() {
        assert_eq!(page_urls(BASE, "page", 7).len(), 8);
    }
}
