//! API client for the dashboard server's admin REST API.
//!
//! This module provides the `ApiClient` struct that every endpoint wrapper
//! goes through: build the request, send it, classify the status, and decode
//! the JSON body.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::Config;

use super::ApiError;

/// HTTP request timeout in seconds for clients built here.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Body argument for requests that carry none.
pub(crate) const NO_BODY: Option<&()> = None;

/// Static credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key or service account token, sent as `Bearer`.
    Token(String),
    Basic { username: String, password: String },
}

impl Credentials {
    /// `user:password` selects basic auth; anything else is a token.
    pub fn parse(auth: &str) -> Self {
        match auth.split_once(':') {
            Some((username, password)) => Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            None => Credentials::Token(auth.to_string()),
        }
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// API client for the dashboard server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    /// Always ends in `/` so relative request paths join beneath it
    base_url: Url,
    credentials: Option<Credentials>,
}

impl ApiClient {
    /// Create a client with its own connection pool and a request timeout.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, base_url)?.with_credentials(credentials))
    }

    /// Wrap an already-configured HTTP client. Any auth the caller set up on
    /// `client` (default headers, proxies, TLS) is used as-is.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let mut parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        parsed.set_query(None);
        parsed.set_fragment(None);
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            client,
            base_url: parsed,
            credentials: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.url)?.with_credentials(config.credentials()))
    }

    /// Replace the credentials sent with each request.
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Resolve an absolute API path (`/api/...`) beneath the base URL.
    /// Dynamic segments in `path` must already be percent-encoded.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(ref credentials) = self.credentials {
            request = credentials.apply(request);
        }

        Ok(request.send().await?)
    }

    /// Check if response is successful, returning an error built from the
    /// status and body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, path = %path, "Request rejected");
        Err(ApiError::from_status(status, &body))
    }

    /// Send a request and decode the JSON body of a successful response.
    pub(crate) async fn read<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.read_with_query(method, path, &[], body).await
    }

    pub(crate) async fn read_with_query<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, query, body).await?;
        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request where only the status matters.
    pub(crate) async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, &[], body).await?;
        Self::check_response(response).await?;
        Ok(())
    }
}
