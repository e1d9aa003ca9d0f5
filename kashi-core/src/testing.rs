//! In-memory page fetcher for tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use tracing::warn;

use crate::error::SearchError;
use crate::http::PageFetcher;

/// Serves canned pages by exact URL and records every request.
///
/// Pages registered with an error status still return their body, the way
/// [`crate::HttpPageFetcher`] does. Unknown URLs fail like a refused connection.
#[derive(Debug, Default)]
pub struct StaticPageFetcher {
    pages: HashMap<String, (StatusCode, String)>,
    requests: Mutex<Vec<String>>,
}

impl StaticPageFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `200 OK` page body for a URL
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status_page(url, StatusCode::OK, body)
    }

    /// Register a page body served with the given status
    #[must_use]
    pub fn with_status_page(
        mut self,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        self.pages.insert(url.into(), (status, body.into()));
        self
    }

    /// URLs requested so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn get_text(&self, url: &str) -> Result<String, SearchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let Some((status, body)) = self.pages.get(url) else {
            return Err(SearchError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no page registered for {url}"),
            )));
        };
        if !status.is_success() {
            warn!("GET {} returned status: {}", url, status);
        }
        Ok(body.clone())
    }
}
