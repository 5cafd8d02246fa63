//! HTTP transport seam for the chat-completions call.
//!
//! The generator only ever issues a single JSON POST, so the trait is exactly
//! that. [`HttpTransport`] is the production `reqwest` implementation; tests
//! substitute their own.

use crate::error::GenerateError;
use crate::trace_debug;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// A fully prepared JSON POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPost {
    pub url: String,
    /// Sent in addition to `Content-Type: application/json`
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: String,
}

impl JsonPost {
    /// Value of the first header named `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back: status and raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the full response.
    ///
    /// Only failures that prevent any HTTP response are errors here;
    /// non-2xx statuses are returned as ordinary responses.
    async fn post_json(&self, request: JsonPost) -> Result<TransportResponse, GenerateError>;
}

/// `reqwest`-backed transport with the client's default (unbounded) timeout
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: JsonPost) -> Result<TransportResponse, GenerateError> {
        trace_debug!(url = %request.url, bytes = request.body.len(), "posting chat completion request");

        let headers = header_map(&request.headers)?;
        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    GenerateError::InvalidRequest(e.to_string())
                } else {
                    GenerateError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Network(format!("failed to read response body: {e}")))?;

        trace_debug!(status, bytes = body.len(), "received chat completion response");
        Ok(TransportResponse { status, body })
    }
}

/// Content type plus the request's own headers, validated up front.
/// Values are never echoed back since they carry credentials.
fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, GenerateError> {
    let mut map = HeaderMap::new();
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in headers {
        let invalid = || {
            GenerateError::InvalidRequest(format!(
                "header {name} contains characters not allowed in HTTP headers (trailing newline in a secret?)"
            ))
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.append(header_name, header_value);
    }

    Ok(map)
}
