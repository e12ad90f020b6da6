// # HTTP Transport
//
// This crate provides the reqwest-backed transport for the invdns client.
//
// ## Behavior
//
// - One HTTP request per `send` call
// - `content-type: application/json` on every request
// - HTTP basic auth when a username is configured
// - Client timeout of 30 seconds
// - Non-2xx responses map to `Error::Http` with status and body
// - Connection and timeout failures map to `Error::Transport`
// - NO retry logic
//
// ## Security
//
// - The password NEVER appears in logs or `Debug` output

use async_trait::async_trait;
use invdns_core::config::ClientConfig;
use invdns_core::traits::{ApiRequest, ApiResponse, HttpMethod, Transport};
use invdns_core::{Error, Result};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
const USER_AGENT: &str = concat!("invdns/", env!("CARGO_PKG_VERSION"));

/// reqwest transport for the inventory API
pub struct HttpTransport {
    /// Remote base URL without trailing slash
    remote: String,

    /// Basic auth username
    username: Option<String>,

    /// Basic auth password
    /// ⚠️ NEVER log this value
    password: Option<String>,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("remote", &self.remote)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport for `remote`
    ///
    /// # Parameters
    ///
    /// - `remote`: Base URL, e.g. `https://inventory.example.com`
    /// - `username`/`password`: Optional basic auth credentials
    pub fn new(
        remote: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        let remote = remote.into().trim_end_matches('/').to_string();
        if remote.is_empty() {
            return Err(Error::config("Remote URL cannot be empty"));
        }

        Ok(Self {
            remote,
            username: username.filter(|u| !u.is_empty()),
            password,
            client,
        })
    }

    /// Create a transport from a validated client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.remote.clone(),
            config.username.clone(),
            config.password.clone(),
        )
    }

    /// Full URL for a request path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.remote, path.trim_start_matches('/'))
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Get => Method::GET,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Send one request
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /api/v1_dns/addressrecord/
    /// Authorization: Basic <credentials>
    /// Content-Type: application/json
    ///
    /// {"domain": "example.com", "ip_str": "10.0.0.1", ...}
    /// ```
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(method(request.method), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(ref username) = self.username {
            builder = builder.basic_auth(username, self.password.as_deref());
        }

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::transport(format!("Request to {} timed out: {}", url, e))
            } else {
                Error::transport(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::debug!("{} {} failed with {}", request.method, url, status);
            return Err(Error::http(status.as_u16(), body));
        }

        Ok(ApiResponse::new(status.as_u16(), body))
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}
