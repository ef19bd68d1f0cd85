//! Location partitioner

use studio_meta::Location;

use crate::collection::{FieldCollection, to_sequence};
use crate::field::Field;

/// Ordered fields of `collection` that belong to `location`.
///
/// Fields without a location only appear when `location` is the default.
pub fn fields_in(
    collection: &FieldCollection,
    location: &Location,
    default_location: &Location,
) -> Vec<Field> {
    to_sequence(collection)
        .into_iter()
        .filter(|field| field.is_in(location, default_location))
        .collect()
}

/// Every distinct location used by the collection, default included for
/// location-less fields, sorted.
pub fn locations_used(collection: &FieldCollection, default_location: &Location) -> Vec<Location> {
    let mut locations: Vec<Location> = collection
        .values()
        .map(|field| field.location_or(default_location).clone())
        .collect();
    locations.sort();
    locations.dedup();
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::to_mapping;

    fn placed(name: &str, location: Option<&str>, order: usize) -> Field {
        Field {
            location: location.map(Location::from),
            order,
            ..Field::new(name)
        }
    }

    #[test]
    fn test_fields_in_filters_and_orders() {
        let collection = to_mapping(vec![
            placed("a", Some("editor"), 1),
            placed("b", Some("inspector"), 0),
            placed("c", None, 0),
        ]);
        let editor = Location::editor();

        let names: Vec<String> = fields_in(&collection, &editor, &editor)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["c", "a"]);

        let names: Vec<String> = fields_in(&collection, &Location::inspector(), &editor)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn test_locations_used() {
        let collection = to_mapping(vec![
            placed("a", None, 0),
            placed("b", Some("inspector"), 0),
            placed("c", Some("editor"), 1),
        ]);
        assert_eq!(
            locations_used(&collection, &Location::editor()),
            vec![Location::editor(), Location::inspector()]
        );
    }
}
