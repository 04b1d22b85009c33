//! reqwest-backed [`Transport`] implementation.
//!
//! Translates the engine's [`ApiRequest`] into real HTTP against a
//! configured base URL and folds the outcome into the uniform
//! [`TransportResponse`] envelope. Network failures and non-2xx statuses
//! are reported in the envelope, never as panics.

use async_trait::async_trait;
use rentio_query::{ApiRequest, HttpMethod, Transport, TransportResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL the endpoint paths are appended to, e.g.
    /// `https://api.example.com` (no trailing slash).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// A [`Transport`] that performs requests with reqwest.
pub struct HttpTransport {
    config: HttpConfig,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for the configured API host.
    #[must_use]
    pub fn new(config: HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> TransportResponse {
        let url = self.url_for(&request.endpoint);
        debug!(method = %request.method, %url, "dispatching request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "request failed before a response arrived");
                // Status 0: no HTTP response was received at all.
                return TransportResponse::failed(0, e.to_string());
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let data: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        if status.is_success() {
            TransportResponse::ok_with_status(status.as_u16(), data)
        } else {
            let message = error_message(&data, &text, status.as_u16());
            warn!(%url, status = status.as_u16(), %message, "request rejected");
            TransportResponse::failed(status.as_u16(), message)
        }
    }
}

/// Picks the most useful failure message out of an error body.
///
/// DRF-style APIs put it under `detail`; otherwise the raw body (or the
/// bare status code when the body is empty) has to do.
fn error_message(data: &Value, text: &str, status: u16) -> String {
    if let Some(detail) = data.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }
    if text.is_empty() {
        format!("request failed with status {status}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = HttpConfig {
            base_url: "https://api.rentio.example".to_string(),
            timeout_secs: 5,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: HttpConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.timeout_secs, 5);
    }

    #[test]
    fn endpoint_is_appended_to_base() {
        let transport = HttpTransport::new(HttpConfig {
            base_url: "https://api.rentio.example".to_string(),
            timeout_secs: 30,
        });
        assert_eq!(
            transport.url_for("/api/properties/"),
            "https://api.rentio.example/api/properties/"
        );
    }

    #[test]
    fn error_message_prefers_detail() {
        let data: Value = serde_json::json!({"detail": "not found"});
        assert_eq!(error_message(&data, "{\"detail\":\"not found\"}", 404), "not found");
        assert_eq!(error_message(&Value::Null, "plain text", 500), "plain text");
        assert_eq!(
            error_message(&Value::Null, "", 502),
            "request failed with status 502"
        );
    }
}
