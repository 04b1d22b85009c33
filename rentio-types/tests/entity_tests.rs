use pretty_assertions::assert_eq;
use rentio_types::{
    Enquiry, Favourite, Property, Resource, ResourceId, ResourceKind, Review, UserProfile,
};
use std::time::Duration;

// ── ResourceKind ──────────────────────────────────────────────────

#[test]
fn resource_kind_endpoints() {
    assert_eq!(ResourceKind::Property.endpoint(), "/api/properties/");
    assert_eq!(ResourceKind::User.endpoint(), "/api/users/");
    assert_eq!(ResourceKind::Enquiry.endpoint(), "/api/enquiries/");
    assert_eq!(ResourceKind::Review.endpoint(), "/api/reviews/");
    assert_eq!(ResourceKind::Favourite.endpoint(), "/api/favourites/");
}

#[test]
fn resource_kind_ttls() {
    assert_eq!(ResourceKind::Property.cache_ttl(), Duration::from_secs(300));
    assert_eq!(ResourceKind::User.cache_ttl(), Duration::from_secs(300));
    assert_eq!(ResourceKind::Review.cache_ttl(), Duration::from_secs(180));
    assert_eq!(ResourceKind::Enquiry.cache_ttl(), Duration::from_secs(120));
    assert_eq!(ResourceKind::Favourite.cache_ttl(), Duration::from_secs(300));
}

#[test]
fn resource_kind_display() {
    assert_eq!(ResourceKind::Property.to_string(), "property");
    assert_eq!(ResourceKind::Enquiry.to_string(), "enquiry");
}

// ── Entity deserialization ────────────────────────────────────────

#[test]
fn property_deserializes_with_sparse_fields() {
    let json = r#"{"id": 10, "title": "City flat", "price": 1200.0}"#;
    let p: Property = serde_json::from_str(json).unwrap();
    assert_eq!(p.id(), ResourceId::new(10));
    assert_eq!(p.title, "City flat");
    assert_eq!(p.price, 1200.0);
    assert_eq!(p.description, "");
    assert_eq!(p.bedrooms, None);
    assert_eq!(Property::KIND, ResourceKind::Property);
}

#[test]
fn user_profile_deserializes() {
    let json = r#"{"id": 3, "username": "ada", "is_agent": true}"#;
    let u: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(u.id(), ResourceId::new(3));
    assert!(u.is_agent);
    assert_eq!(u.email, "");
}

#[test]
fn enquiry_deserializes_without_reference() {
    let json = r#"{"id": 1, "property": 10, "sender": 3, "message": "Is it available?"}"#;
    let e: Enquiry = serde_json::from_str(json).unwrap();
    assert_eq!(e.property, ResourceId::new(10));
    assert!(e.reference.is_none());
    assert!(!e.read);
}

#[test]
fn review_roundtrip() {
    let review = Review {
        id: ResourceId::new(5),
        property: ResourceId::new(10),
        author: ResourceId::new(3),
        rating: 4,
        comment: "Lovely place".into(),
        created_at: Some("2026-01-10T12:00:00Z".into()),
    };
    let json = serde_json::to_string(&review).unwrap();
    let parsed: Review = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, review);
}

#[test]
fn favourite_identity() {
    let fav = Favourite {
        id: ResourceId::new(8),
        property: ResourceId::new(10),
        user: ResourceId::new(3),
        created_at: None,
    };
    assert_eq!(fav.id(), ResourceId::new(8));
    assert_eq!(Favourite::KIND, ResourceKind::Favourite);
}
