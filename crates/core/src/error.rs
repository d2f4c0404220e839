//! Error types for the pagination core.
//!
//! This module defines two error types:
//!
//! - [`PaginationError`] - Request validation and ordering errors
//! - [`StorageError`] - Failures of the backing store (slice, materialize, count)
//!
//! Storage errors convert into pagination errors via `From`, so `?` works
//! from a [`crate::ports::Sequence`] call straight through the planner.

use thiserror::Error;

/// Message for a non-positive limit.
///
/// GraphQL clients match on the "positive integer" phrase, keep it intact.
pub const LIMIT_NOT_POSITIVE: &str = "Limit must be positive integer greater than 0";

/// Message for a negative offset.
pub const OFFSET_NEGATIVE: &str = "Offset must be a non-negative integer";

// =============================================================================
// Pagination Errors
// =============================================================================

/// Errors raised while resolving a paginated field.
///
/// None of these are retried. They fail the whole field resolution.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// The requested limit is not a strictly positive integer.
    #[error("{0}")]
    InvalidLimit(String),

    /// The requested offset is negative.
    #[error("{0}")]
    InvalidOffset(String),

    /// Ordering string is not of the form `"field, direction"`.
    #[error("Malformed ordering '{0}': expected \"<field>, <asc|desc>\"")]
    MalformedOrdering(String),

    /// Ordering names a field the sequence cannot sort by.
    #[error("Cannot order by unknown field: {0}")]
    UnknownOrderingField(String),

    /// Backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Backing store errors.
///
/// These originate from sequence adapters and are propagated untouched.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish database connection.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Query execution failed.
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Database migration failed.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// Row conversion failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
