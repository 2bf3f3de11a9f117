//! The fetch collaborator and its HTTP implementation.

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{FetchError, Result};

/// A GET request with optional extra headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub body: String,
    /// The URL the body was served from, after redirects. Relative links in
    /// the body resolve against it.
    pub final_url: String,
}

/// Retrieves documents. Implementations must be usable from several threads
/// at once.
pub trait Fetch: Send + Sync {
    fn fetch(&self, request: &Request) -> Result<Page>;
}

/// [`Fetch`] over HTTPS with a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("darkcss/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, request: &Request) -> Result<Page> {
        let network = |source| FetchError::Network {
            url: request.url.clone(),
            source,
        };

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().map_err(network)?;
        debug!(url = %request.url, final_url = %final_url, bytes = body.len(), "fetched");
        Ok(Page { body, final_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = Request::get("https://github.com").header("User-Agent", "test");
        assert_eq!(request.url, "https://github.com");
        assert_eq!(
            request.headers,
            vec![("User-Agent".to_string(), "test".to_string())]
        );
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
