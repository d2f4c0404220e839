//! Pagination types shared between the planner and its adapters.
//!
//! Windows are expressed as `limit`/`offset` pairs over an ordered
//! sequence. Offsets do not need to align to page boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A window request as received from the API layer.
///
/// `limit` and `offset` are kept signed so that invalid input can be
/// reported instead of being rejected by a type conversion upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Maximum number of elements to return. `None` means unlimited.
    pub limit: Option<i64>,
    /// Number of elements to skip.
    #[serde(default)]
    pub offset: i64,
    /// Raw ordering directive, `"<field>, <asc|desc>"`.
    pub ordering: Option<String>,
}

impl WindowRequest {
    /// Request `limit` elements starting at `offset`.
    pub fn new(limit: Option<i64>, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ordering: None,
        }
    }

    /// Attach a raw ordering directive.
    pub fn with_ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }
}

/// A lazily evaluated slice of a sequence.
///
/// Nothing is fetched until the bounds are handed to
/// [`crate::ports::Sequence::materialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBounds {
    /// First element index.
    pub offset: u64,
    /// Number of elements, or everything up to the end.
    pub length: Option<u64>,
}

impl SliceBounds {
    /// The whole sequence.
    pub const ALL: SliceBounds = SliceBounds {
        offset: 0,
        length: None,
    };

    /// `[offset, offset + length)`.
    pub fn window(offset: u64, length: u64) -> Self {
        Self {
            offset,
            length: Some(length),
        }
    }
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Whether there are items before this page (`offset > 0`).
    pub has_previous_page: bool,
    /// Whether an item exists beyond `offset + limit`.
    pub has_next_page: bool,
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl OrderDirection {
    /// Prefix applied to a field name to request this direction.
    pub fn prefix(self) -> &'static str {
        match self {
            OrderDirection::Asc => "",
            OrderDirection::Desc => "-",
        }
    }
}

/// A normalized ordering: a snake_case field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: String,
    pub direction: OrderDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Desc,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == OrderDirection::Desc
    }
}

/// Renders as the prefixed field name, e.g. `-created_at`.
impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.prefix(), self.field)
    }
}
