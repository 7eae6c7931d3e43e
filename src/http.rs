//! Outbound HTTP.
//!
//! Everything that talks to the network goes through [`Fetcher`], so the cache
//! and location logic can be exercised without sockets.

use std::time::Duration;

use crate::error::SunbarError;

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, for error messages.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Fetcher {
    /// Issue a GET request with the given query parameters.
    ///
    /// Only transport failures are errors; any HTTP status is returned as a
    /// response for the caller to judge.
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SunbarError>;
}

/// Blocking reqwest client with a bounded timeout.
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SunbarError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sunbar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SunbarError::Network {
                url: String::new(),
                message: format!("http client init failed: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SunbarError> {
        let network_error = |e: reqwest::Error| SunbarError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(network_error)?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
