//! Engine behavior through a session over stored content.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Map, Value, json};
use studio_blocks::{FieldRef, Location, Outcome, SkipReason};
use studio_test_utils::field::block_of;
use studio_test_utils::{FieldBuilder, TestDocument};

fn settings(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn card() -> TestDocument {
    TestDocument::from_block(&block_of(
        "block-studio/card",
        vec![
            FieldBuilder::new("x").location("editor").order(0),
            FieldBuilder::new("y").location("editor").order(1),
            FieldBuilder::new("z").location("editor").order(2),
            FieldBuilder::new("side").location("inspector").order(0),
            FieldBuilder::new("items")
                .location("inspector")
                .order(1)
                .repeater(vec![FieldBuilder::new("row").order(0), FieldBuilder::new("cell").order(1)]),
        ],
    ))
}

#[test]
fn test_reorder_swaps_in_stored_content() {
    let mut doc = TestDocument::from_content(
        r#"{"block-studio/card":{"fields":{"a":{"name":"a","order":0},"b":{"name":"b","order":1}}}}"#,
    );
    doc.reorder_fields(0, 1, &Location::editor(), None).unwrap();

    doc.assert_order("a", 1);
    doc.assert_order("b", 0);
    assert_eq!(doc.current().fields.get("a").unwrap().name, "a");
}

#[test]
fn test_add_twice_to_empty_content() {
    let mut doc = TestDocument::new();

    let first = doc.add_new_field(&Location::editor(), None).unwrap();
    assert_eq!(first.value().map(String::as_str), Some("new-field"));
    let second = doc.add_new_field(&Location::editor(), None).unwrap();
    assert_eq!(second.value().map(String::as_str), Some("new-field-2"));

    doc.assert_order("new-field", 0);
    doc.assert_order("new-field-2", 1);
    let field = doc.get_field(&FieldRef::new("new-field")).unwrap();
    assert_eq!(field.location, Some(Location::editor()));
    assert_eq!(doc.writes(), 2);
}

#[test]
fn test_location_move_keeps_both_groups_dense() {
    let mut doc = card();
    let outcome = doc
        .change_field_settings(&FieldRef::new("x"), &settings(json!({"location": "inspector"})))
        .unwrap();
    assert!(outcome.is_applied());

    let editor = doc.get_fields_for_location(&Location::editor(), None).unwrap();
    let inspector = doc.get_fields_for_location(&Location::inspector(), None).unwrap();
    assert!(editor.iter().all(|f| f.name != "x"));
    assert_eq!(inspector.last().map(|f| f.name.as_str()), Some("x"));
    doc.assert_orders_dense();
}

#[test]
fn test_duplicate_skips_taken_suffix() {
    let mut doc = card();
    doc.duplicate_field(&FieldRef::new("x")).unwrap();
    let outcome = doc.duplicate_field(&FieldRef::new("x")).unwrap();

    assert_eq!(outcome.value().map(String::as_str), Some("x-3"));
    doc.assert_field_exists("x-2");
    doc.assert_field_exists("x-3");
    doc.assert_orders_dense();
}

#[test]
fn test_rename_with_collision_suffixes_key() {
    let mut doc = card();
    let outcome = doc.rename_field(&FieldRef::new("y"), "x").unwrap();
    assert_eq!(outcome.value().map(String::as_str), Some("x-2"));

    doc.assert_field_not_exists("y");
    doc.assert_field_exists("x");
    doc.assert_field_exists("x-2");
}

#[test]
fn test_rename_repeater_keeps_children_attached() {
    let mut doc = card();
    doc.rename_field(&FieldRef::new("items"), "rows").unwrap();

    doc.assert_sub_field_exists("rows", "row");
    doc.assert_sub_field_exists("rows", "cell");
    let row = doc.get_field(&FieldRef::nested("row", "rows")).unwrap();
    assert_eq!(row.parent.as_deref(), Some("rows"));
    assert!(doc.current().validate().is_ok());
}

#[test]
fn test_nested_add_and_delete() {
    let mut doc = card();
    let outcome = doc
        .add_new_field(&Location::editor(), Some("items"))
        .unwrap();
    assert_eq!(outcome.value().map(String::as_str), Some("new-field"));
    doc.assert_sub_field_exists("items", "new-field");

    doc.delete_field(&FieldRef::nested("row", "items")).unwrap();
    let subs = doc
        .get_fields_for_location(&Location::editor(), Some("items"))
        .unwrap();
    let names: Vec<&str> = subs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["cell", "new-field"]);
    doc.assert_orders_dense();
}

#[test]
fn test_change_control_then_settings() {
    let mut doc = card();
    doc.change_control(&FieldRef::new("y"), "range").unwrap();

    let outcome = doc
        .change_field_settings(&FieldRef::new("y"), &settings(json!({"min": 10, "max": 5})))
        .unwrap();
    assert!(matches!(
        outcome,
        Outcome::Skipped(SkipReason::InvalidSettings { .. })
    ));

    doc.change_field_settings(&FieldRef::new("y"), &settings(json!({"max": 50, "step": 5})))
        .unwrap();
    let field = doc.get_field(&FieldRef::new("y")).unwrap();
    assert_eq!(field.control, "range");
    assert_eq!(field.setting("max"), Some(&json!(50)));
    assert_eq!(field.setting("min"), Some(&json!(0)));
}

#[rstest]
#[case::unknown_field(FieldRef::new("ghost"))]
#[case::unknown_parent(FieldRef::nested("row", "ghost"))]
#[case::wrong_parent(FieldRef::nested("row", "side"))]
fn test_unknown_references_leave_content_alone(#[case] reference: FieldRef) {
    let mut doc = card();
    let before = doc.content();

    assert!(!doc.delete_field(&reference).unwrap().is_applied());
    assert!(!doc.duplicate_field(&reference).unwrap().is_applied());
    assert!(!doc.change_control(&reference, "toggle").unwrap().is_applied());
    assert!(!doc.rename_field(&reference, "renamed").unwrap().is_applied());

    assert_eq!(doc.content(), before);
    assert_eq!(doc.writes(), 0);
}

#[test]
fn test_block_metadata_survives_edits() {
    let mut doc = TestDocument::from_content(
        r#"{"block-studio/hero":{"name":"block-studio/hero","title":"Hero","icon":"star","fields":{}}}"#,
    );
    doc.add_new_field(&Location::inspector(), None).unwrap();

    let block = doc.current();
    assert_eq!(block.meta.get("title"), Some(&json!("Hero")));
    assert_eq!(block.meta.get("icon"), Some(&json!("star")));
}

#[test]
fn test_legacy_array_collection_is_upgraded_on_write() {
    let mut doc = TestDocument::from_content(
        r#"{"block-studio/old":{"fields":[{"name":"a","order":0},{"name":"b","order":1}]}}"#,
    );
    doc.delete_field(&FieldRef::new("a")).unwrap();

    let stored: Value = serde_json::from_str(&doc.content()).unwrap();
    assert!(stored["block-studio/old"]["fields"].is_object());
    doc.assert_order("b", 0);
}
