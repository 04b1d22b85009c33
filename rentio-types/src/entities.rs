//! Domain entity structs for the five marketplace resources.
//!
//! These mirror the backend's serialized shapes. Fields the backend may
//! omit are optional or defaulted; timestamps are carried as opaque
//! strings since nothing client-side computes with them.

use crate::{EnquiryRef, Resource, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};

/// A rental property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub property_type: String,
    pub price: f64,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub toilets: Option<u32>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub owner: Option<ResourceId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Property {
    const KIND: ResourceKind = ResourceKind::Property;

    fn id(&self) -> ResourceId {
        self.id
    }
}

/// A user directory profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: ResourceId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_agent: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Resource for UserProfile {
    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> ResourceId {
        self.id
    }
}

/// An enquiry sent about a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: ResourceId,
    pub property: ResourceId,
    pub sender: ResourceId,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub reference: Option<EnquiryRef>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Enquiry {
    const KIND: ResourceKind = ResourceKind::Enquiry;

    fn id(&self) -> ResourceId {
        self.id
    }
}

/// A review left on a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ResourceId,
    pub property: ResourceId,
    pub author: ResourceId,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Review {
    const KIND: ResourceKind = ResourceKind::Review;

    fn id(&self) -> ResourceId {
        self.id
    }
}

/// A saved-property favourite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favourite {
    pub id: ResourceId,
    pub property: ResourceId,
    pub user: ResourceId,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Favourite {
    const KIND: ResourceKind = ResourceKind::Favourite;

    fn id(&self) -> ResourceId {
        self.id
    }
}
