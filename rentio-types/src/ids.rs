//! Identifier types used throughout the Rentio client.
//!
//! The marketplace API hands out integer primary keys for every resource;
//! enquiry threads additionally carry a client-generated UUID reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a resource as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
    /// Creates a resource ID from a raw backend key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the underlying integer key.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parses a resource ID from a string.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| crate::Error::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for ResourceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Client-generated reference code attached to an enquiry thread so the
/// sender can quote it in follow-up correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnquiryRef(Uuid);

impl EnquiryRef {
    /// Creates a new random reference.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a reference from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a reference from a string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EnquiryRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnquiryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EnquiryRef {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
