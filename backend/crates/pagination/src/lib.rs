//! Opaque cursor and page envelope primitives.
//!
//! Listings that preserve a stable order (for example insertion order) can be
//! paged by remembering the last item a client saw: its key and where it sat
//! in the listing. Both are wrapped in a [`Cursor`] and encoded as URL-safe
//! base64 JSON so clients treat it as an opaque token. When that item has
//! since left the listing, the next page starts where it used to be.
//!
//! ```
//! use pagination::{PageLimit, PageRequest, paginate};
//!
//! let names = vec!["ada", "grace", "linus"];
//! let first = paginate(names.clone(), &PageRequest::new(None, PageLimit::new(2)?), |n| {
//!     (*n).to_owned()
//! });
//! assert_eq!(first.items, vec!["ada", "grace"]);
//!
//! let cursor = first.next_cursor.as_deref().map(pagination::Cursor::decode).transpose()?;
//! let second = paginate(names, &PageRequest::new(cursor, PageLimit::new(2)?), |n| {
//!     (*n).to_owned()
//! });
//! assert_eq!(second.items, vec!["linus"]);
//! assert!(second.next_cursor.is_none());
//! # Ok::<(), pagination::PaginationError>(())
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest page a client may request.
pub const MIN_PAGE_LIMIT: usize = 1;
/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: usize = 100;
/// Page size used when the client does not supply one.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Errors raised while decoding cursors or applying them to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The cursor token is not valid base64 or does not contain cursor JSON.
    #[error("cursor is malformed")]
    MalformedCursor,
    /// The requested limit falls outside the supported range.
    #[error("page limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange {
        /// Smallest accepted limit.
        min: usize,
        /// Largest accepted limit.
        max: usize,
        /// Limit supplied by the caller.
        actual: usize,
    },
}

/// Position marker naming the last item returned by the previous page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    after: String,
    #[serde(default)]
    position: usize,
}

impl Cursor {
    /// Build a cursor that resumes after the item with the given key, which
    /// sat at `position` when the page was served.
    #[must_use]
    pub fn after(key: impl Into<String>, position: usize) -> Self {
        Self {
            after: key.into(),
            position,
        }
    }

    /// Key of the last item seen by the client.
    #[must_use]
    pub fn key(&self) -> &str {
        self.after.as_str()
    }

    /// Zero-based index the last item had in the listing.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Encode the cursor as an opaque URL-safe token.
    #[must_use]
    pub fn encode(&self) -> String {
        // Serialising a struct holding a single string cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a token previously produced by [`Cursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::MalformedCursor`] when the token is not
    /// base64 or does not decode to cursor JSON.
    pub fn decode(token: &str) -> Result<Self, PaginationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| PaginationError::MalformedCursor)?;
        serde_json::from_slice(&bytes).map_err(|_| PaginationError::MalformedCursor)
    }
}

/// Validated page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(usize);

impl PageLimit {
    /// Validate a requested page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::LimitOutOfRange`] when `limit` is outside
    /// [`MIN_PAGE_LIMIT`]..=[`MAX_PAGE_LIMIT`].
    pub const fn new(limit: usize) -> Result<Self, PaginationError> {
        if limit < MIN_PAGE_LIMIT || limit > MAX_PAGE_LIMIT {
            return Err(PaginationError::LimitOutOfRange {
                min: MIN_PAGE_LIMIT,
                max: MAX_PAGE_LIMIT,
                actual: limit,
            });
        }
        Ok(Self(limit))
    }

    /// Page size as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(DEFAULT_PAGE_LIMIT)
    }
}

/// Cursor and limit supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    cursor: Option<Cursor>,
    limit: PageLimit,
}

impl PageRequest {
    /// Combine an optional cursor with a validated limit.
    #[must_use]
    pub const fn new(cursor: Option<Cursor>, limit: PageLimit) -> Self {
        Self { cursor, limit }
    }

    /// Cursor to resume from, if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> PageLimit {
        self.limit
    }
}

/// Page envelope returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Token for the following page; absent on the last page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Transform every item while keeping the cursor.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Slice an ordered listing into a page.
///
/// `key` must return a value that is unique within `items`; the cursor stores
/// the key and index of the last item on the page. A cursor whose item is no
/// longer in `items` resumes at the index that item had, clamped to the end.
#[must_use]
pub fn paginate<T, F>(items: Vec<T>, request: &PageRequest, key: F) -> Page<T>
where
    F: Fn(&T) -> String,
{
    let start = match request.cursor() {
        None => 0,
        Some(cursor) => items
            .iter()
            .position(|item| key(item) == cursor.key())
            .map_or_else(
                || cursor.position().min(items.len()),
                |found| found.saturating_add(1),
            ),
    };

    let limit = request.limit().get();
    let last_index = start.saturating_add(limit).saturating_sub(1);
    let mut remaining = items.into_iter().skip(start);
    let page: Vec<T> = remaining.by_ref().take(limit).collect();
    let has_more = remaining.next().is_some();

    let next_cursor = if has_more {
        page.last()
            .map(|item| Cursor::after(key(item), last_index).encode())
    } else {
        None
    };

    Page {
        items: page,
        next_cursor,
    }
}
