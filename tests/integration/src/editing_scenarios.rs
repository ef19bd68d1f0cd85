//! End-to-end editing sessions against stored block content.
//!
//! Each test drives a [`TestDocument`] the way an editor UI would: every
//! step re-reads the stored content and writes the full block back.

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use studio_blocks::{FieldRef, Location, read_block};
use studio_test_utils::TestDocument;

fn settings(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn names_in(doc: &TestDocument, location: &Location) -> Vec<String> {
    doc.get_fields_for_location(location, None)
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect()
}

#[test]
fn test_reorder_swaps_two_fields() {
    let mut doc = TestDocument::from_content(
        &json!({"block-studio/pair": {"fields": {
            "a": {"name": "a", "order": 0},
            "b": {"name": "b", "order": 1}
        }}})
        .to_string(),
    );

    doc.reorder_fields(0, 1, &Location::editor(), None).unwrap();

    assert_eq!(names_in(&doc, &Location::editor()), vec!["b", "a"]);
    doc.assert_order("a", 1);
    doc.assert_order("b", 0);
}

#[test]
fn test_building_a_block_from_scratch() {
    let mut doc = TestDocument::new();

    let first = doc.add_new_field(&Location::editor(), None).unwrap();
    assert_eq!(first.value().map(String::as_str), Some("new-field"));
    let field = doc.get_field(&FieldRef::new("new-field")).unwrap();
    assert_eq!(field.order, 0);
    assert_eq!(field.location, Some(Location::editor()));

    let second = doc.add_new_field(&Location::editor(), None).unwrap();
    assert_eq!(second.value().map(String::as_str), Some("new-field-2"));
    assert_eq!(doc.get_field(&FieldRef::new("new-field-2")).unwrap().label, "New Field 2");

    doc.rename_field(&FieldRef::new("new-field"), "heading").unwrap();
    doc.change_field_settings(
        &FieldRef::new("new-field-2"),
        &settings(json!({"name": "image", "label": "Image"})),
    )
    .unwrap();
    doc.change_control(&FieldRef::new("image"), "image").unwrap();

    assert_eq!(names_in(&doc, &Location::editor()), vec!["heading", "image"]);
    let image = doc.get_field(&FieldRef::new("image")).unwrap();
    assert_eq!(image.control, "image");
    assert_eq!(image.label, "Image");
    doc.assert_orders_dense();

    let block = read_block(&doc.content()).unwrap().unwrap();
    assert_eq!(block.name, "block-studio/block");
}

#[test]
fn test_moving_a_field_to_the_inspector() {
    let mut doc = TestDocument::from_content(
        &json!({"block-studio/card": {"fields": {
            "x": {"name": "x", "location": "editor", "order": 0},
            "y": {"name": "y", "location": "editor", "order": 1},
            "s": {"name": "s", "location": "inspector", "order": 0}
        }}})
        .to_string(),
    );

    let outcome = doc
        .change_field_settings(&FieldRef::new("x"), &settings(json!({"location": "inspector"})))
        .unwrap();
    assert!(outcome.is_applied());

    assert_eq!(names_in(&doc, &Location::editor()), vec!["y"]);
    assert_eq!(names_in(&doc, &Location::inspector()), vec!["s", "x"]);
    doc.assert_order("y", 0);
    doc.assert_order("x", 1);
    doc.assert_orders_dense();
}

#[test]
fn test_move_and_rename_in_one_change() {
    let mut doc = TestDocument::from_content(
        &json!({"block-studio/card": {"fields": {
            "x": {"name": "x", "location": "editor", "order": 0},
            "s": {"name": "s", "location": "inspector", "order": 0}
        }}})
        .to_string(),
    );

    doc.change_field_settings(
        &FieldRef::new("x"),
        &settings(json!({"location": "inspector", "name": "s"})),
    )
    .unwrap();

    assert_eq!(names_in(&doc, &Location::editor()), Vec::<String>::new());
    let moved = doc.get_field(&FieldRef::new("s-2")).unwrap();
    assert_eq!(moved.location, Some(Location::inspector()));
    assert_eq!(moved.order, 1);
}

#[test]
fn test_duplicating_next_to_an_existing_copy() {
    let mut doc = TestDocument::from_content(
        &json!({"block-studio/card": {"fields": {
            "x": {"name": "x", "label": "X", "order": 0, "placeholder": "type here"},
            "x-2": {"name": "x-2", "order": 1}
        }}})
        .to_string(),
    );

    let outcome = doc.duplicate_field(&FieldRef::new("x")).unwrap();
    assert_eq!(outcome.value().map(String::as_str), Some("x-3"));

    let copy = doc.get_field(&FieldRef::new("x-3")).unwrap();
    assert_eq!(copy.name, "x-3");
    assert_eq!(copy.label, "X");
    assert_eq!(copy.setting("placeholder"), Some(&json!("type here")));
    doc.assert_order("x-3", 2);
}

#[test]
fn test_repeater_round_trip() {
    let mut doc = TestDocument::new();
    doc.add_new_field(&Location::inspector(), None).unwrap();
    doc.change_control(&FieldRef::new("new-field"), "repeater").unwrap();
    doc.rename_field(&FieldRef::new("new-field"), "slides").unwrap();

    doc.add_new_field(&Location::editor(), Some("slides")).unwrap();
    doc.add_new_field(&Location::editor(), Some("slides")).unwrap();
    doc.reorder_fields(0, 1, &Location::editor(), Some("slides")).unwrap();

    let subs: Vec<String> = doc
        .get_fields_for_location(&Location::editor(), Some("slides"))
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(subs, vec!["new-field-2", "new-field"]);

    let duplicated = doc.duplicate_field(&FieldRef::new("slides")).unwrap();
    assert_eq!(duplicated.value().map(String::as_str), Some("slides-2"));
    doc.assert_sub_field_exists("slides-2", "new-field");
    doc.assert_orders_dense();
    assert!(doc.current().validate().is_ok());

    // Top-level editor fields are unaffected by nested adds.
    assert!(names_in(&doc, &Location::editor()).is_empty());
}

#[test]
fn test_malformed_content_is_reported_not_overwritten() {
    let mut doc = TestDocument::from_content("{\"block-studio/card\": ");
    assert!(doc.add_new_field(&Location::editor(), None).is_err());
    assert_eq!(doc.content(), "{\"block-studio/card\": ");
    assert_eq!(doc.writes(), 0);
}
