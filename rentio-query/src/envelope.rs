//! Backend envelope → domain transforms.
//!
//! Each resource type supplies a [`PageMapper`] that turns the raw
//! backend payload into the uniform [`Page`] shape. Plain resources use
//! [`RecordPageMapper`]; the properties resource nests its results in a
//! GeoJSON feature collection and uses [`FeaturePageMapper`].

use crate::error::{QueryError, QueryResult};
use rentio_types::Page;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Converts raw backend payloads into the uniform paginated shape.
pub trait PageMapper<T>: Send + Sync {
    /// Maps a list payload into a page.
    fn map_page(&self, raw: &Value) -> QueryResult<Page<T>>;

    /// Maps a single-entity payload into an item.
    fn map_item(&self, raw: &Value) -> QueryResult<T>;
}

/// Mapper for the standard `{count, next, previous, results}` envelope.
///
/// Also accepts a bare array, which unpaginated endpoints return.
pub struct RecordPageMapper;

impl<T: DeserializeOwned + Send + Sync> PageMapper<T> for RecordPageMapper {
    fn map_page(&self, raw: &Value) -> QueryResult<Page<T>> {
        if raw.is_array() {
            let items: Vec<T> = serde_json::from_value(raw.clone())?;
            return Ok(Page {
                count: items.len() as u64,
                items,
                next: None,
                previous: None,
            });
        }

        let results = raw
            .get("results")
            .cloned()
            .ok_or_else(|| QueryError::Envelope("missing results field".into()))?;
        let items: Vec<T> = serde_json::from_value(results)?;

        Ok(Page {
            items,
            count: raw.get("count").and_then(Value::as_u64).unwrap_or_default(),
            next: cursor(raw, "next"),
            previous: cursor(raw, "previous"),
        })
    }

    fn map_item(&self, raw: &Value) -> QueryResult<T> {
        Ok(serde_json::from_value(raw.clone())?)
    }
}

/// Mapper for the properties resource, whose `results` field is a GeoJSON
/// feature collection. Each feature's `properties` object is flattened
/// with the feature `id` and point coordinates injected.
pub struct FeaturePageMapper;

impl<T: DeserializeOwned + Send + Sync> PageMapper<T> for FeaturePageMapper {
    fn map_page(&self, raw: &Value) -> QueryResult<Page<T>> {
        // `results.features` in the paginated envelope; a bare feature
        // collection may also arrive from unpaginated endpoints.
        let collection = raw.get("results").unwrap_or(raw);
        let features = collection
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| QueryError::Envelope("missing features array".into()))?;

        let mut items = Vec::with_capacity(features.len());
        for feature in features {
            let flat = flatten_feature(feature)?;
            items.push(serde_json::from_value(flat)?);
        }

        Ok(Page {
            items,
            count: raw.get("count").and_then(Value::as_u64).unwrap_or_default(),
            next: cursor(raw, "next"),
            previous: cursor(raw, "previous"),
        })
    }

    fn map_item(&self, raw: &Value) -> QueryResult<T> {
        if raw.get("type").and_then(Value::as_str) == Some("Feature") {
            let flat = flatten_feature(raw)?;
            Ok(serde_json::from_value(flat)?)
        } else {
            Ok(serde_json::from_value(raw.clone())?)
        }
    }
}

fn cursor(raw: &Value, field: &str) -> Option<String> {
    raw.get(field).and_then(Value::as_str).map(String::from)
}

/// Merges a GeoJSON feature into one flat object: properties + id +
/// point coordinates (longitude, latitude order on the wire).
fn flatten_feature(feature: &Value) -> QueryResult<Value> {
    let mut flat = match feature.get("properties") {
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(QueryError::Envelope(
                "feature properties is not an object".into(),
            ))
        }
        None => Map::new(),
    };

    if let Some(id) = feature.get("id") {
        flat.insert("id".into(), id.clone());
    }

    if let Some(coords) = feature
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
    {
        if coords.len() == 2 {
            flat.insert("longitude".into(), coords[0].clone());
            flat.insert("latitude".into(), coords[1].clone());
        }
    }

    Ok(Value::Object(flat))
}
