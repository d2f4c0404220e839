//! Ordering normalizer.
//!
//! Turns the API-facing ordering directive `"createdAt, desc"` into a
//! [`SortKey`] in the store's naming convention (`created_at`, descending)
//! and applies it to a sequence.

use tracing::debug;

use crate::error::{PaginationError, PaginationResult};
use crate::ports::{OrderDirection, OrderableBy, Sequence, SortKey};

/// Parse a raw `"<field>, <direction>"` directive.
///
/// Spaces anywhere in the directive are dropped; tabs and newlines are
/// kept as part of the tokens. Only the literal token `desc` selects
/// descending order; every other token, including `DESC`, `"\tdesc"` or
/// an empty one, is ascending.
pub fn parse_ordering(raw: &str) -> PaginationResult<SortKey> {
    let compact = raw.replace(' ', "");
    let mut tokens = compact.split(',');

    let (Some(field), Some(direction), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(PaginationError::MalformedOrdering(raw.to_string()));
    };
    if field.is_empty() {
        return Err(PaginationError::MalformedOrdering(raw.to_string()));
    }

    let direction = if direction == "desc" {
        OrderDirection::Desc
    } else {
        OrderDirection::Asc
    };

    Ok(SortKey {
        field: camel_to_snake(field),
        direction,
    })
}

/// Convert a camelCase name to snake_case.
///
/// An underscore goes before every ASCII uppercase letter except a leading
/// one, then the whole name is lowercased. Purely lexical: `createdAt`
/// becomes `created_at`, `HTTPCode` becomes `h_t_t_p_code`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Apply an optional ordering directive to a sequence.
///
/// No directive (or an empty one) returns the sequence unchanged. A custom
/// ordering capability, when given, replaces the sequence's own
/// field-based ordering. Unknown fields surface from whichever of the two
/// performs the sort.
pub fn normalize<S: Sequence>(
    sequence: S,
    ordering: Option<&str>,
    custom: Option<&dyn OrderableBy<S>>,
) -> PaginationResult<S> {
    let Some(raw) = ordering.filter(|raw| !raw.is_empty()) else {
        return Ok(sequence);
    };

    let key = parse_ordering(raw)?;
    debug!(ordering = %key, custom = custom.is_some(), "Applying ordering");

    match custom {
        Some(capability) => capability.order(sequence, &key),
        None => sequence.order_by(&key),
    }
}
