//! Page fetching over HTTP.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::error::SearchError;

/// Fetches a page and returns its body as text
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the decoded body.
    ///
    /// Error pages are returned like any other page; searching them finds
    /// nothing, which makes the site fall through to not-found.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn get_text(&self, url: &str) -> Result<String, SearchError>;
}

/// `reqwest` backed page fetcher with timeouts and transient-failure retries
pub struct HttpPageFetcher {
    client: ClientWithMiddleware,
}

impl HttpPageFetcher {
    /// Create a page fetcher from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &HttpConfig) -> Result<Self, SearchError> {
        let base_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        // Wrap with retry middleware (exponential backoff)
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get_text(&self, url: &str) -> Result<String, SearchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("GET {} -> {}", url, status);
        } else {
            warn!("GET {} returned status: {}", url, status);
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0_u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    fn config() -> HttpConfig {
        HttpConfig {
            max_retries: 0,
            ..HttpConfig::default()
        }
    }

    #[tokio::test]
    async fn test_success_body_is_returned() {
        let base = serve_once("200 OK", "<html><body>ok</body></html>").await;
        let fetcher = HttpPageFetcher::new(&config()).unwrap();

        let body = fetcher.get_text(&format!("{base}/search")).await.unwrap();

        assert_eq!(body, "<html><body>ok</body></html>");
    }

    #[tokio::test]
    async fn test_error_status_body_is_returned() {
        let base = serve_once("404 Not Found", "<html><body>no results</body></html>").await;
        let fetcher = HttpPageFetcher::new(&config()).unwrap();

        let body = fetcher.get_text(&format!("{base}/search")).await.unwrap();

        assert_eq!(body, "<html><body>no results</body></html>");
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = HttpPageFetcher::new(&config()).unwrap();

        let result = fetcher.get_text(&format!("http://{addr}/search")).await;

        assert!(matches!(result, Err(SearchError::Middleware(_))));
    }
}
