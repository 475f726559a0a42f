//! Transport metadata returned alongside decoded bodies.

use crate::pagination::PaginationLinks;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Header carrying GitHub's request identifier.
pub const REQUEST_ID_HEADER: &str = "x-github-request-id";

/// Status, headers and pagination links of a completed API call.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    request_id: Option<String>,
    links: PaginationLinks,
}

impl Response {
    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap) -> Self {
        let request_id = request_id(&headers);
        let links = PaginationLinks::from_headers(&headers);
        Self {
            status,
            headers,
            request_id,
            links,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Value of the `X-GitHub-Request-Id` header.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Links parsed from the `Link` header.
    pub fn links(&self) -> &PaginationLinks {
        &self.links
    }

    /// Next page number, if the listing continues.
    pub fn next_page(&self) -> Option<u32> {
        self.links.next_page()
    }

    /// Last page number, if known.
    pub fn last_page(&self) -> Option<u32> {
        self.links.last_page()
    }
}

pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
