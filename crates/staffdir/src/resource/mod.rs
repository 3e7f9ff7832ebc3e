// ABOUTME: Resource handling module for fetching directory pages over HTTP.
// ABOUTME: Defines the Transport seam, the reqwest-backed HttpTransport, content-length limits, and charset decoding.

pub mod retry;

pub use retry::Fetcher;

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::ScrapeError;
use crate::options::Options;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// A response as it came off the wire, before any status interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Build a `text/html` response with the given status and body.
    pub fn html(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            final_url: url.into(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Bytes::from(body.into()),
        }
    }

    /// Decode the body as UTF-8 text, using charset hints from content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// One blocking GET. Implementations report transport failures as `Err` and
/// hand back every response that arrived, whatever its status.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        (**self).get(url)
    }
}

/// Transport backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    headers: HashMap<String, String>,
}

impl HttpTransport {
    /// Build a transport from scraper options, reusing `opts.http_client` when set.
    pub fn new(opts: &Options) -> Result<Self, ScrapeError> {
        let client = match &opts.http_client {
            Some(client) => client.clone(),
            None => reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch("", "BuildClient", Some(anyhow::Error::new(e)))
                })?,
        };
        Ok(Self {
            client,
            headers: opts.headers.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        let parsed_url = url::Url::parse(url).map_err(|e| {
            ScrapeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;

        let scheme = parsed_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ScrapeError::invalid_url(
                url,
                "Fetch",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let mut request = self.client.get(parsed_url);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().map_err(|e| {
            ScrapeError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
        })?;

        // Use content_length() first, fallback to parsing header manually
        let content_length = response.content_length().or_else(|| {
            response
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
        });
        if let Some(len) = content_length {
            if len as usize > MAX_CONTENT_LENGTH {
                return Err(ScrapeError::fetch(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("content too large")),
                ));
            }
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response.bytes().map_err(|e| {
            ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            )
        })?;

        if body.len() > MAX_CONTENT_LENGTH {
            return Err(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }

        Ok(RawResponse {
            status,
            final_url,
            content_type,
            body,
        })
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(&Options::default()).expect("client should build")
    }

    #[test]
    fn get_returns_body_and_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/staff");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html><body>hello</body></html>");
        });

        let resp = transport().get(&server.url("/staff")).expect("get should succeed");
        mock.assert();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.text_utf8(), "<html><body>hello</body></html>");
        assert_eq!(resp.content_type.as_deref(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn get_passes_non_200_through() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let resp = transport().get(&server.url("/missing")).expect("404 is still a response");
        mock.assert();
        assert_eq!(resp.status, 404);
    }

    #[test]
    fn get_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/hdr").header("x-district", "110");
            then.status(200).body("ok");
        });

        let mut opts = Options::default();
        opts.headers.insert("x-district".to_string(), "110".to_string());
        let resp = HttpTransport::new(&opts).unwrap().get(&server.url("/hdr")).unwrap();
        mock.assert();
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn get_rejects_non_http_scheme() {
        let err = transport().get("ftp://example.com/staff").unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[test]
    fn get_reports_connection_failure_as_fetch_error() {
        // Port 9 (discard) on loopback is not expected to be listening.
        let err = transport().get("http://127.0.0.1:9/staff").unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_max_content_length_constant() {
        assert_eq!(MAX_CONTENT_LENGTH, 10 * 1024 * 1024);
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=utf-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"ISO-8859-1\""),
            Some("iso-8859-1".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn test_decode_body_with_charset() {
        let decoded = decode_body(&[0x63, 0x61, 0x66, 0xe9], Some("text/html; charset=iso-8859-1"));
        assert_eq!(decoded, "café");
    }

    #[test]
    fn html_helper_sets_content_type() {
        let resp = RawResponse::html(200, "https://example.com", "<p>x</p>");
        assert_eq!(resp.text_utf8(), "<p>x</p>");
    }
}
