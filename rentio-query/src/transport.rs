//! Transport layer abstraction.
//!
//! The engine never performs I/O itself; it hands an [`ApiRequest`] to a
//! [`Transport`] and gets back a uniform [`TransportResponse`] envelope.
//! The engine inspects only `success`/`error`/`data`, never the raw
//! status code. Retries, timeouts, and cancellation are transport
//! concerns.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// HTTP-style request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request handed to the transport.
///
/// GET requests carry `query` parameters; non-GET requests carry a JSON
/// `body`. Headers include whatever the auth provider supplied.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl ApiRequest {
    /// Creates a request with no parameters, body, or headers.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: BTreeMap::new(),
            body: None,
            headers: HashMap::new(),
        }
    }

    /// A GET request.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// A POST request.
    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// A PUT request.
    #[must_use]
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// A PATCH request.
    #[must_use]
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, endpoint)
    }

    /// A DELETE request.
    #[must_use]
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Attaches query parameters.
    #[must_use]
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Extends the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Uniform response envelope produced by every transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Parsed response payload; `Null` when the body was empty.
    pub data: Value,
    /// Raw status code, for diagnostics only.
    pub status: u16,
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable failure message when `success` is false.
    pub error: Option<String>,
}

impl TransportResponse {
    /// A successful response.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            status: 200,
            success: true,
            error: None,
        }
    }

    /// A successful response with an explicit status code.
    #[must_use]
    pub fn ok_with_status(status: u16, data: Value) -> Self {
        Self {
            data,
            status,
            success: true,
            error: None,
        }
    }

    /// A failed response.
    #[must_use]
    pub fn failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            status,
            success: false,
            error: Some(message.into()),
        }
    }
}

/// A transport that can perform requests against the marketplace API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a request, returning the uniform envelope.
    /// Transports never panic on failure; they report it in the envelope.
    async fn request(&self, request: ApiRequest) -> TransportResponse;
}

/// Supplies authentication headers for every request.
///
/// The engine attaches these without interpreting their contents.
pub trait AuthProvider: Send + Sync {
    /// Headers to attach, e.g. a bearer token.
    fn auth_headers(&self) -> HashMap<String, String>;
}

/// An auth provider that supplies no headers.
pub struct AnonymousAuth;

impl AuthProvider for AnonymousAuth {
    fn auth_headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// A mock transport for testing.
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockResponse {
        response: TransportResponse,
        latency: Option<Duration>,
    }

    /// Queue-backed transport: responses are consumed in request order,
    /// and every request is recorded for inspection.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<MockResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        /// Creates a mock transport with no queued responses.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response.
        pub fn enqueue(&self, response: TransportResponse) {
            self.responses.lock().unwrap().push_back(MockResponse {
                response,
                latency: None,
            });
        }

        /// Queues a response that resolves only after `latency` elapses
        /// (tokio virtual time applies under `start_paused` tests).
        pub fn enqueue_with_latency(&self, response: TransportResponse, latency: Duration) {
            self.responses.lock().unwrap().push_back(MockResponse {
                response,
                latency: Some(latency),
            });
        }

        /// All requests seen so far.
        #[must_use]
        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Number of requests seen so far.
        #[must_use]
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn request(&self, request: ApiRequest) -> TransportResponse {
            self.requests.lock().unwrap().push(request);

            // Pop before sleeping so responses pair with requests in
            // issue order even when latencies overlap.
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(mock) => {
                    if let Some(latency) = mock.latency {
                        tokio::time::sleep(latency).await;
                    }
                    mock.response
                }
                None => TransportResponse::failed(599, "no mock response queued"),
            }
        }
    }
}
