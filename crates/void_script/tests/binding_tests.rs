//! Integration tests for script bindings and field rendering

use void_core::ObjectId;
use void_script::*;

const INVENTORY: &str = r#"
/* @fields
[
  { "name": "ownerName", "type": "STRING", "default": "Hero" },
  { "name": "capacity", "type": "NUMBER", "default": 8, "options": { "min": 1, "max": 64, "step": 1 } },
  { "name": "sorted", "type": "BOOLEAN" },
  { "name": "sortKey", "type": "ENUM", "options": { "options": ["name", "weight", "value"] } },
  { "name": "iconSheet", "type": "FILE" },
  { "name": "display", "type": "GROUP", "children": [
    { "name": "anchor", "type": "GAMEOBJECT" },
    { "name": "scale", "type": "NUMBER", "default": 1, "options": { "min": 0.5, "max": 2 } }
  ]},
  { "name": "position", "type": "VECTOR3" }
]
*/
export default class Inventory {}
"#;

fn inventory(target: ObjectId) -> ScriptBinding {
    let loaders = ScriptLoaders::with_defaults();
    ScriptBinding::load(&loaders, "inventory.js", INVENTORY, target).unwrap()
}

/// A value of the right shape for a rendered field that differs from its
/// current one.
fn valid_value_for(field: &RenderedField) -> FieldValue {
    match &field.control {
        Control::TextInput { .. } => FieldValue::String(format!("{}-edited", field.name())),
        Control::NumberInput { min, max, .. } => {
            let low = min.unwrap_or(0.0);
            let high = max.unwrap_or(low + 10.0);
            FieldValue::Number((low + high) / 2.0)
        }
        Control::Toggle { .. } => {
            FieldValue::Boolean(!field.value().and_then(FieldValue::as_bool).unwrap_or(false))
        }
        Control::Dropdown { choices } => FieldValue::String(choices.last().cloned().unwrap()),
        Control::Picker {
            scope: PickScope::File,
            ..
        } => FieldValue::String("textures/icons.png".into()),
        Control::Picker {
            scope: PickScope::GameObject,
            ..
        } => ObjectRef::new(ObjectId::new(42, 3), "Chest").into(),
        Control::Group { .. } => panic!("groups hold no value"),
    }
}

#[test]
fn test_every_value_field_round_trips_through_its_control() {
    let mut binding = inventory(ObjectId::new(0, 0));
    let rendered = binding.render();

    let value_fields: Vec<RenderedField> = rendered
        .iter()
        .flat_map(RenderedField::walk)
        .filter(|f| f.kind.holds_value())
        .cloned()
        .collect();
    assert_eq!(value_fields.len(), 7);

    for field in value_fields {
        let value = valid_value_for(&field);
        binding.set(&field.path, value.clone()).unwrap();
        assert_eq!(binding.get(&field.path), Some(value), "field {}", field.path);
    }
}

#[test]
fn test_rendered_labels_and_values() {
    let binding = inventory(ObjectId::new(0, 0));
    let rendered = binding.render();

    // The VECTOR3 declaration never renders
    assert_eq!(rendered.len(), 6);
    assert!(rendered.iter().all(|f| f.name() != "position"));

    let labels: Vec<&str> = rendered.iter().map(RenderedField::label).collect();
    assert_eq!(
        labels,
        ["Owner Name", "Capacity", "Sorted", "Sort Key", "Icon Sheet", "Display"]
    );
    assert_eq!(rendered[0].value(), Some(&FieldValue::from("Hero")));
    assert_eq!(rendered[1].value(), Some(&FieldValue::from(8.0)));
    assert_eq!(rendered[3].value(), Some(&FieldValue::from("name")));

    let Control::Group { children } = &rendered[5].control else {
        panic!("display is a group");
    };
    assert_eq!(children[1].value(), Some(&FieldValue::from(1.0)));
    assert!(children.iter().all(|c| c.parent.as_deref() == Some("display")));
}

#[test]
fn test_invalid_writes_leave_value_alone() {
    let mut binding = inventory(ObjectId::new(0, 0));
    let capacity = FieldPath::root("capacity");

    assert!(matches!(
        binding.set(&capacity, 100.0.into()),
        Err(FieldError::OutOfRange { .. })
    ));
    assert!(matches!(
        binding.set(&FieldPath::root("sortKey"), "colour".into()),
        Err(FieldError::InvalidChoice { .. })
    ));
    assert!(matches!(
        binding.set(&FieldPath::root("position"), 1.0.into()),
        Err(FieldError::UnknownField(_))
    ));
    assert_eq!(binding.get(&capacity), Some(8.0.into()));
}

#[test]
fn test_duplicate_keeps_values_and_retargets() {
    let mut binding = inventory(ObjectId::new(0, 0));
    binding
        .set(&FieldPath::parse("display.scale"), 1.5.into())
        .unwrap();

    let copy = binding.duplicate_for(ObjectId::new(5, 0));
    assert_eq!(copy.target(), ObjectId::new(5, 0));
    assert_eq!(copy.source_name(), "inventory.js");
    assert_eq!(copy.get(&FieldPath::parse("display.scale")), Some(1.5.into()));
    assert_eq!(copy.definition(), binding.definition());
}

#[test]
fn test_rebuild_from_new_source_carries_fitting_values() {
    let target = ObjectId::new(0, 0);
    let mut old = inventory(target);
    old.set(&FieldPath::root("capacity"), 32.0.into()).unwrap();
    old.set(&FieldPath::root("ownerName"), "Rogue".into()).unwrap();

    let edited = INVENTORY.replace(r#""max": 64"#, r#""max": 16"#);
    let loaders = ScriptLoaders::with_defaults();
    let mut fresh = ScriptBinding::load(&loaders, "inventory.js", &edited, target).unwrap();

    old.carry_values_into(&mut fresh);
    assert_eq!(fresh.get(&FieldPath::root("ownerName")), Some("Rogue".into()));
    assert_eq!(fresh.get(&FieldPath::root("capacity")), Some(8.0.into()));
}
