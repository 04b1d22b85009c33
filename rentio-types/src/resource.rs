//! The [`Resource`] trait and the catalogue of marketplace resource kinds.

use crate::ResourceId;
use std::fmt;
use std::time::Duration;

/// The five marketplace resource kinds, each served by its own engine
/// instance with its own endpoint and cache TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Rental property listings.
    Property,
    /// User directory profiles.
    User,
    /// Enquiry/messaging threads.
    Enquiry,
    /// Property reviews.
    Review,
    /// Saved-property favourites.
    Favourite,
}

impl ResourceKind {
    /// Default API endpoint path for this resource.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Property => "/api/properties/",
            ResourceKind::User => "/api/users/",
            ResourceKind::Enquiry => "/api/enquiries/",
            ResourceKind::Review => "/api/reviews/",
            ResourceKind::Favourite => "/api/favourites/",
        }
    }

    /// How long a cached list for this resource stays valid.
    /// Messaging-style resources churn fastest, listings slowest.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        match self {
            ResourceKind::Property | ResourceKind::User | ResourceKind::Favourite => {
                Duration::from_secs(5 * 60)
            }
            ResourceKind::Review => Duration::from_secs(3 * 60),
            ResourceKind::Enquiry => Duration::from_secs(2 * 60),
        }
    }

    /// Lowercase name, used in log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Property => "property",
            ResourceKind::User => "user",
            ResourceKind::Enquiry => "enquiry",
            ResourceKind::Review => "review",
            ResourceKind::Favourite => "favourite",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain entity the query engine can manage.
///
/// The engine never interprets an entity's fields beyond its identifier,
/// which it uses for order-preserving uniqueness in lists and for
/// reconciling mutations against locally held state.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Which resource kind this entity belongs to.
    const KIND: ResourceKind;

    /// The backend-assigned identifier.
    fn id(&self) -> ResourceId;
}
