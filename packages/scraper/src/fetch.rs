//! Page fetching.
//!
//! [`PageFetcher`] is the seam between the scraper and the network: the
//! production [`HttpFetcher`] uses `reqwest`, while tests substitute a
//! fixture-backed implementation.

use std::time::Duration;

use crate::ScrapeError;
use crate::site::SiteDefinition;

/// Trait for retrieving the raw HTML of a page.
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the request fails or the server
    /// responds with a non-success status.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;
}

/// [`PageFetcher`] backed by a shared [`reqwest::Client`].
///
/// The client is built once with the site's user agent and default headers.
/// No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher configured for `site`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if a configured header name or value
    /// is invalid, or [`ScrapeError::Http`] if the client cannot be built.
    pub fn new(site: &SiteDefinition) -> Result<Self, ScrapeError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in &site.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScrapeError::Config(format!("invalid header name '{key}': {e}")))?;
            let val = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| ScrapeError::Config(format!("invalid header value '{value}': {e}")))?;
            header_map.insert(name, val);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(site.user_agent.as_str())
            .default_headers(header_map);

        if let Some(secs) = site.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        log::trace!("Received {} bytes from {url}", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::melon;

    #[test]
    fn builds_client_for_embedded_site() {
        assert!(HttpFetcher::new(&melon()).is_ok());
    }

    #[test]
    fn rejects_invalid_header_name() {
        let mut site = melon();
        site.headers.insert("Bad Header".to_string(), "value".to_string());
        assert!(matches!(HttpFetcher::new(&site), Err(ScrapeError::Config(_))));
    }

    #[tokio::test]
    async fn malformed_url_surfaces_http_error() {
        let fetcher = HttpFetcher::new(&melon()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {err}");
    }
}
