//! HTTP access to the search service.
//!
//! [`SearchBackend`] is the seam between the poll loop and the network.
//! [`HttpBackend`] talks to a real store over plain HTTP.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, TailError};
use crate::search::{SearchResponse, StatusResponse};

/// Operations the tailer needs from the search service.
#[allow(async_fn_in_trait)]
pub trait SearchBackend {
    /// Fetches the store's status document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn status(&self) -> Result<StatusResponse>;

    /// Runs a search against one index.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse>;
}

/// Plain-HTTP backend for an Elasticsearch node.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    host: String,
}

impl HttpBackend {
    /// Creates a backend for `host` (`host:port`, no scheme).
    ///
    /// `timeout` bounds each request; `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::Config`] if the HTTP client cannot be built.
    pub fn new(host: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TailError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: host.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.host, path)
    }

    fn connection_error(&self, err: &reqwest::Error) -> TailError {
        TailError::Connection {
            host: self.host.clone(),
            message: err.to_string(),
        }
    }
}

impl SearchBackend for HttpBackend {
    async fn status(&self) -> Result<StatusResponse> {
        let url = self.url("_status");
        trace!(url = %url, "Fetching status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(&e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.connection_error(&e))?;

        if status != StatusCode::OK {
            return Err(TailError::StatusFailed {
                status: status.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| TailError::decode("_status", e))
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let url = self.url(&format!("{index}/_search"));
        debug!(url = %url, "Searching");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.connection_error(&e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.connection_error(&e))?;

        if status != StatusCode::OK {
            return Err(TailError::SearchFailed {
                status: status.to_string(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| TailError::decode("_search", e))
    }
}
