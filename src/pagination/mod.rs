//! `Link` header parsing for list responses.

use reqwest::header::{HeaderMap, LINK};

/// Pagination links parsed from the Link header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// URL for the next page.
    pub next: Option<String>,
    /// URL for the previous page.
    pub prev: Option<String>,
    /// URL for the first page.
    pub first: Option<String>,
    /// URL for the last page.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parses pagination links from the Link header (RFC 8288).
    pub fn from_header(header_value: &str) -> Self {
        let mut links = Self::default();

        for part in header_value.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                    url = Some(inner.to_string());
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"').to_string());
                }
            }

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel.as_str() {
                    "next" => links.next = Some(url),
                    "prev" => links.prev = Some(url),
                    "first" => links.first = Some(url),
                    "last" => links.last = Some(url),
                    _ => {}
                }
            }
        }

        links
    }

    /// Parses pagination links from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Page number of the next page.
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(extract_page_number)
    }

    /// Page number of the previous page.
    pub fn prev_page(&self) -> Option<u32> {
        self.prev.as_deref().and_then(extract_page_number)
    }

    /// Page number of the first page.
    pub fn first_page(&self) -> Option<u32> {
        self.first.as_deref().and_then(extract_page_number)
    }

    /// Page number of the last page.
    pub fn last_page(&self) -> Option<u32> {
        self.last.as_deref().and_then(extract_page_number)
    }
}

/// Extracts the `page` query parameter from a URL.
pub fn extract_page_number(url: &str) -> Option<u32> {
    url::Url::parse(url).ok().and_then(|u| {
        u.query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    })
}
