//! Sessions driven by host configuration and host-supplied controls.

use pretty_assertions::assert_eq;
use serde_json::json;
use studio_blocks::{FieldEngine, FieldRef, Location, Outcome, SkipReason};
use studio_meta::EditorConfig;
use studio_test_utils::{ControlsDir, TestDocument};

const CONFIG: &str = r#"
block_namespace = "acme"
default_control = "headline"
new_field_base = "field"
new_field_label = "Field"
normalize_on_write = false

[locations]
primary = "canvas"
secondary = "sidebar"
"#;

const HEADLINE: &str = r#"
name = "headline"
label = "Headline"
type = "string"

[default_settings]
level = 2
placeholder = ""
"#;

fn configured() -> TestDocument {
    let controls = ControlsDir::new();
    controls.write("headline.toml", HEADLINE);
    controls.write("broken.toml", "name = ");

    let config = EditorConfig::from_toml(CONFIG).unwrap();
    TestDocument::with_engine("", FieldEngine::new(config, controls.registry()))
}

#[test]
fn test_new_fields_follow_configuration() {
    let mut doc = configured();
    let canvas = Location::from("canvas");

    doc.add_new_field(&canvas, None).unwrap();
    doc.add_new_field(&canvas, None).unwrap();

    let block = doc.current();
    assert_eq!(block.name, "acme/block");

    let second = doc.get_field(&FieldRef::new("field-2")).unwrap();
    assert_eq!(second.label, "Field 2");
    assert_eq!(second.control, "headline");
    assert_eq!(second.setting("level"), Some(&json!(2)));
    assert_eq!(second.location, Some(canvas.clone()));

    let on_canvas = doc.get_fields_for_location(&canvas, None).unwrap();
    assert_eq!(on_canvas.len(), 2);
}

#[test]
fn test_location_less_fields_belong_to_primary() {
    let doc = TestDocument::with_config(
        &json!({"acme/card": {"fields": {"a": {"name": "a", "order": 0}}}}).to_string(),
        EditorConfig::from_toml(CONFIG).unwrap(),
    );

    let canvas = doc
        .get_fields_for_location(&Location::from("canvas"), None)
        .unwrap();
    assert_eq!(canvas.len(), 1);
    assert!(doc
        .get_fields_for_location(&Location::editor(), None)
        .unwrap()
        .is_empty());
}

#[test]
fn test_gaps_survive_without_normalize_on_write() {
    let mut doc = configured();
    let sidebar = Location::from("sidebar");
    for _ in 0..3 {
        doc.add_new_field(&sidebar, None).unwrap();
    }

    doc.delete_field(&FieldRef::new("field")).unwrap();
    doc.assert_order("field-2", 1);
    doc.assert_order("field-3", 2);
}

#[test]
fn test_builtins_and_host_controls_side_by_side() {
    let mut doc = configured();
    doc.add_new_field(&Location::from("canvas"), None).unwrap();

    doc.change_control(&FieldRef::new("field"), "toggle").unwrap();
    assert_eq!(
        doc.get_field(&FieldRef::new("field")).unwrap().setting("default"),
        Some(&json!(false))
    );

    let outcome = doc.change_control(&FieldRef::new("field"), "broken").unwrap();
    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::UnknownControl {
            control: "broken".into()
        })
    );
}
