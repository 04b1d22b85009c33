//! Pagination descriptors.
//!
//! The backend returns opaque next/previous cursors (observed as full URLs
//! carrying a `page` query parameter). Callers must only rely on "null
//! means no further page"; the token extraction here is the one place that
//! looks inside a cursor.

use serde::{Deserialize, Serialize};
use url::Url;

/// One page of results in the uniform internal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in backend order.
    pub items: Vec<T>,
    /// Total result count across all pages.
    pub count: u64,
    /// Opaque cursor for the next page, if any.
    pub next: Option<String>,
    /// Opaque cursor for the previous page, if any.
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// An empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next: None,
            previous: None,
        }
    }

    /// The pagination descriptor for this page, without the items.
    #[must_use]
    pub fn info(&self) -> PageInfo {
        PageInfo {
            count: self.count,
            next: self.next.clone(),
            previous: self.previous.clone(),
        }
    }
}

/// Cursor state for the currently loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total result count across all pages.
    pub count: u64,
    /// Opaque cursor for the next page, if any.
    pub next: Option<String>,
    /// Opaque cursor for the previous page, if any.
    pub previous: Option<String>,
}

impl PageInfo {
    /// Whether a further page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Page token extracted from the next cursor.
    #[must_use]
    pub fn next_page_token(&self) -> Option<String> {
        self.next.as_deref().and_then(page_token)
    }

    /// Page token extracted from the previous cursor.
    ///
    /// The backend omits the `page` parameter when the previous page is the
    /// first one, so a previous cursor without a token means page 1.
    #[must_use]
    pub fn previous_page_token(&self) -> Option<String> {
        self.previous
            .as_deref()
            .map(|cursor| page_token(cursor).unwrap_or_else(|| "1".to_string()))
    }
}

/// Extracts the `page` query parameter from a cursor.
///
/// Accepts both absolute and host-relative cursors. Returns `None` when the
/// cursor carries no page parameter or cannot be parsed as a URL at all.
#[must_use]
pub fn page_token(cursor: &str) -> Option<String> {
    let url = match Url::parse(cursor) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://relative.invalid").ok()?;
            base.join(cursor).ok()?
        }
        Err(_) => return None,
    };

    url.query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
}
