//! Filter sets and their canonical normalization.
//!
//! A [`FilterSet`] is the loosely-typed filter mapping callers build up;
//! [`FilterSet::normalize`] flattens it into a string-valued
//! [`NormalizedFilters`] map that is sent as query parameters and whose
//! [`signature`](NormalizedFilters::signature) keys the query cache.
//!
//! Both maps are `BTreeMap`s, so key order is canonical by construction and
//! two semantically equal filter sets can never produce different cache
//! signatures through insertion order.

use std::collections::BTreeMap;

/// A single filter value before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Free text (search terms, city names, enum-like values).
    Text(String),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Boolean toggle.
    Flag(bool),
    /// Multi-select value, joined with `,` on normalization.
    List(Vec<String>),
    /// Numeric range, split into `__gte`/`__lte` bounds on normalization.
    Range { min: Option<f64>, max: Option<f64> },
}

impl FilterValue {
    /// A text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// A multi-select value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// A numeric range with optional bounds.
    #[must_use]
    pub const fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range { min, max }
    }

    /// Whether this value normalizes to nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
            Self::Range { min, max } => min.is_none() && max.is_none(),
            Self::Int(_) | Self::Float(_) | Self::Flag(_) => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// A mapping from filter name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a filter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a filter by name.
    pub fn remove(&mut self, name: &str) -> Option<FilterValue> {
        self.0.remove(name)
    }

    /// Looks up a filter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    /// Whether a filter with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over filter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `overrides` into this set; the override wins per key.
    pub fn merge(&mut self, overrides: &FilterSet) {
        for (name, value) in &overrides.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Drops every filter whose value normalizes to nothing, so an
    /// override carrying an empty value acts as a per-key clear.
    pub fn purge_empty(&mut self) {
        self.0.retain(|_, value| !value.is_empty());
    }

    /// Flattens this set into canonical string-valued filters.
    ///
    /// - list values are joined with `,` (empty elements dropped);
    /// - `Range` values and `min_<k>`/`max_<k>` scalar aliases become
    ///   `<k>__gte`/`<k>__lte` bounds, the original key disappearing;
    /// - any filter whose final value would be empty is dropped.
    ///
    /// Pure and idempotent: normalizing an already-normalized set is a
    /// no-op.
    #[must_use]
    pub fn normalize(&self) -> NormalizedFilters {
        let mut out = BTreeMap::new();

        for (name, value) in &self.0 {
            match value {
                FilterValue::Text(s) => {
                    if !s.is_empty() {
                        out.insert(bound_key(name), s.clone());
                    }
                }
                FilterValue::Int(i) => {
                    out.insert(bound_key(name), i.to_string());
                }
                FilterValue::Float(f) => {
                    out.insert(bound_key(name), f.to_string());
                }
                FilterValue::Flag(b) => {
                    out.insert(bound_key(name), b.to_string());
                }
                FilterValue::List(items) => {
                    let joined = items
                        .iter()
                        .filter(|item| !item.is_empty())
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(",");
                    if !joined.is_empty() {
                        out.insert(bound_key(name), joined);
                    }
                }
                FilterValue::Range { min, max } => {
                    if let Some(min) = min {
                        out.insert(format!("{name}__gte"), min.to_string());
                    }
                    if let Some(max) = max {
                        out.insert(format!("{name}__lte"), max.to_string());
                    }
                }
            }
        }

        NormalizedFilters(out)
    }
}

impl FromIterator<(String, FilterValue)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Folds `min_<field>`/`max_<field>` scalar aliases into the canonical
/// `<field>__gte`/`<field>__lte` bound form. Keys already carrying a
/// bound suffix pass through untouched, keeping normalization idempotent.
fn bound_key(name: &str) -> String {
    if name.ends_with("__gte") || name.ends_with("__lte") {
        return name.to_string();
    }
    if let Some(field) = name.strip_prefix("min_") {
        format!("{field}__gte")
    } else if let Some(field) = name.strip_prefix("max_") {
        format!("{field}__lte")
    } else {
        name.to_string()
    }
}

/// The canonical, string-valued form of a filter set.
///
/// Keys are sorted (BTreeMap), values are plain strings, and no key maps to
/// an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFilters(BTreeMap<String, String>);

impl NormalizedFilters {
    /// The canonical cache signature for this filter set.
    ///
    /// Serialized as JSON over the sorted map, so two semantically equal
    /// filter sets always produce the same signature.
    #[must_use]
    pub fn signature(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// The underlying sorted map, e.g. for use as query parameters.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Consumes into the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Looks up a normalized value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of normalized filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the normalized set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-wraps the normalized values as a plain text filter set.
    #[must_use]
    pub fn to_filter_set(&self) -> FilterSet {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), FilterValue::Text(value.clone())))
            .collect()
    }
}
