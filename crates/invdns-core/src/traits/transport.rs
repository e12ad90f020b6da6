// # Transport Trait
//
// Defines the interface for sending a prepared API request to the
// inventory server.
//
// ## Implementations
//
// - reqwest: `invdns-http` crate
// - Tests: a recording transport that never touches the network
//
// ## Usage
//
// ```rust,ignore
// use invdns_core::traits::{ApiRequest, HttpMethod, Transport};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let transport = /* Transport implementation */;
//
//     let response = transport
//         .send(ApiRequest::new(HttpMethod::Get, "/api/v1_dns/cname/7/"))
//         .await?;
//     println!("{}", response.body);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// HTTP verb used for one record action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Create
    Post,
    /// Partial update
    Patch,
    /// Delete
    Delete,
    /// Detail
    Get,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request, relative to the configured remote
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute path on the remote, always with a trailing slash
    pub path: String,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// JSON body, `None` for delete and detail
    pub body: Option<Map<String, Value>>,
}

impl ApiRequest {
    /// Create a request without query or body
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Status code
    pub status: u16,
    /// Raw body text
    pub body: String,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON, `None` if empty or not JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Trait for request transports
///
/// A transport sends exactly one request per call and reports the
/// outcome. It never retries and never caches.
///
/// # Errors
///
/// - non-2xx status → `Error::Http` carrying status and body
/// - connection refused, timeout, TLS failure → `Error::Transport`
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the successful response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, crate::Error>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
