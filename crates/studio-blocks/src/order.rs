//! Ordering normalizer

use crate::field::Field;

/// Set each field's `order` to its position in the sequence.
///
/// The input order decides the ranking; names play no part. Normalizing an
/// already-normalized sequence changes nothing.
pub fn normalize(fields: Vec<Field>) -> Vec<Field> {
    fields
        .into_iter()
        .enumerate()
        .map(|(index, mut field)| {
            field.order = index;
            field
        })
        .collect()
}

/// Check that the `order` values of a group are exactly `0..len`.
pub fn is_dense<'a>(fields: impl IntoIterator<Item = &'a Field>) -> bool {
    let mut orders: Vec<usize> = fields.into_iter().map(|f| f.order).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(index, order)| index == *order)
}
