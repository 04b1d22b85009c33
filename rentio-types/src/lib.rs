//! Core type definitions for the Rentio client.
//!
//! This crate defines the fundamental, engine-agnostic types shared by the
//! query layer and the HTTP transport:
//! - Resource and enquiry-reference identifiers
//! - The [`Resource`] trait and the [`ResourceKind`] catalogue
//! - Domain entity structs for the five marketplace resources
//! - Pagination descriptors and cursor token extraction
//!
//! Anything specific to query orchestration (filters, caching, transport)
//! belongs in `rentio-query`, not here.

mod entities;
mod ids;
mod page;
mod resource;

pub use entities::{Enquiry, Favourite, Property, Review, UserProfile};
pub use ids::{EnquiryRef, ResourceId};
pub use page::{page_token, Page, PageInfo};
pub use resource::{Resource, ResourceKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid reference: {0}")]
    InvalidRef(#[from] uuid::Error),
}
