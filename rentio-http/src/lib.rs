//! HTTP transport for the Rentio query engine.
//!
//! Wires [`rentio_query::Transport`] to a real API host with reqwest.
//! Construct an [`HttpTransport`] from an [`HttpConfig`], pair it with an
//! auth provider (e.g. [`BearerAuth`]), and hand both to a
//! `QueryEngine`.
//!
//! ```no_run
//! use rentio_http::{BearerAuth, HttpConfig, HttpTransport};
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HttpTransport::new(HttpConfig {
//!     base_url: "https://api.rentio.example".to_string(),
//!     ..HttpConfig::default()
//! }));
//! let auth = Arc::new(BearerAuth::new("access-token"));
//! # let _ = (transport, auth);
//! ```

mod auth;
mod client;

pub use auth::BearerAuth;
pub use client::{HttpConfig, HttpTransport};
