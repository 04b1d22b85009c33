use rentio_types::{EnquiryRef, ResourceId};
use std::collections::HashSet;
use std::str::FromStr;

// ── ResourceId ────────────────────────────────────────────────────

#[test]
fn resource_id_new_and_as_i64() {
    let id = ResourceId::new(42);
    assert_eq!(id.as_i64(), 42);
}

#[test]
fn resource_id_from_i64() {
    let id: ResourceId = 7.into();
    assert_eq!(id, ResourceId::new(7));
}

#[test]
fn resource_id_display_and_parse() {
    let id = ResourceId::new(1234);
    let s = id.to_string();
    assert_eq!(s, "1234");
    assert_eq!(ResourceId::parse(&s).unwrap(), id);
}

#[test]
fn resource_id_from_str() {
    let parsed: ResourceId = ResourceId::from_str("99").unwrap();
    assert_eq!(parsed, ResourceId::new(99));
}

#[test]
fn resource_id_parse_invalid() {
    assert!(ResourceId::parse("not-a-number").is_err());
    assert!(ResourceId::from_str("").is_err());
}

#[test]
fn resource_id_ordering() {
    assert!(ResourceId::new(1) < ResourceId::new(2));
}

#[test]
fn resource_id_hash_and_eq() {
    let id = ResourceId::new(5);
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id); // duplicate
    assert_eq!(set.len(), 1);
}

#[test]
fn resource_id_serde_is_transparent() {
    let id = ResourceId::new(17);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "17");
    let parsed: ResourceId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

// ── EnquiryRef ────────────────────────────────────────────────────

#[test]
fn enquiry_ref_new_is_unique() {
    let a = EnquiryRef::new();
    let b = EnquiryRef::new();
    assert_ne!(a, b);
}

#[test]
fn enquiry_ref_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::new_v4();
    let r = EnquiryRef::from_uuid(uuid);
    assert_eq!(r.as_uuid(), uuid);
}

#[test]
fn enquiry_ref_display_and_parse() {
    let r = EnquiryRef::new();
    let s = r.to_string();
    assert_eq!(EnquiryRef::parse(&s).unwrap(), r);
    assert_eq!(EnquiryRef::from_str(&s).unwrap(), r);
}

#[test]
fn enquiry_ref_parse_invalid() {
    assert!(EnquiryRef::parse("not-a-uuid").is_err());
}

#[test]
fn enquiry_ref_serde_roundtrip() {
    let r = EnquiryRef::new();
    let json = serde_json::to_string(&r).unwrap();
    let parsed: EnquiryRef = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, r);
}
