//! Identifier allocator
//!
//! Identifiers follow the `base`, `base-2`, `base-3`, ... pattern. The scan
//! is over every key of the collection, case-sensitive, and only matches the
//! exact base: `title` and `subtitle-2` never collide.

use crate::collection::FieldCollection;

/// Base used when the caller does not supply one
pub const DEFAULT_BASE: &str = "new-field";

/// Find the number to append to `base` to get an unused key.
///
/// Returns `None` if `base` itself is free, otherwise the smallest integer
/// `n >= 2` such that `{base}-{n}` is not a key of `collection`.
pub fn next_identifier(collection: &FieldCollection, base: Option<&str>) -> Option<u32> {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BASE);
    if !collection.contains_key(base) {
        return None;
    }
    (2u32..).find(|n| !collection.contains_key(&compose_identifier(base, Some(*n))))
}

/// Join a base and an optional suffix number.
pub fn compose_identifier(base: &str, number: Option<u32>) -> String {
    match number {
        Some(n) => format!("{base}-{n}"),
        None => base.to_string(),
    }
}

/// Produce an unused key derived from `base`.
pub fn allocate_identifier(collection: &FieldCollection, base: Option<&str>) -> String {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BASE);
    compose_identifier(base, next_identifier(collection, Some(base)))
}
