//! Script instances - the live objects behind a binding.

use std::collections::BTreeMap;

use void_core::ObjectId;

use crate::error::FieldError;
use crate::field::{FieldKind, FieldPath, FieldSpec, FieldValue};

/// A script instantiated for one game object.
///
/// The editor only ever talks to scripts through this trait: it lists the
/// declared fields and reads or writes them by path.
pub trait ScriptInstance: Send {
    /// Field declarations in display order.
    fn fields(&self) -> &[FieldSpec];

    /// Current value of a non-group field.
    fn get(&self, path: &FieldPath) -> Option<FieldValue>;

    /// Write a non-group field.
    fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), FieldError>;

    /// Copy this instance, for duplicated game objects.
    fn box_clone(&self) -> Box<dyn ScriptInstance>;

    /// Called when a copy is bound to a different game object.
    fn retarget(&mut self, _target: ObjectId) {}
}

/// Script instance that stores its field values in a table.
///
/// Every non-group field has an entry from construction on, so `get`
/// succeeds for every declared field.
#[derive(Clone, Debug)]
pub struct PropertyTable {
    fields: Vec<FieldSpec>,
    values: BTreeMap<FieldPath, FieldValue>,
    target: ObjectId,
}

impl PropertyTable {
    /// Build a table with default values for every field.
    pub fn new(fields: Vec<FieldSpec>, target: ObjectId) -> Self {
        let mut values = BTreeMap::new();
        collect_defaults(&fields, None, &mut values);
        Self {
            fields,
            values,
            target,
        }
    }

    /// Seed an initial value, validated against the declaration.
    pub fn with_value(mut self, path: FieldPath, value: FieldValue) -> Result<Self, FieldError> {
        self.set(&path, value)?;
        Ok(self)
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// All stored values, ordered by path.
    pub fn values(&self) -> impl Iterator<Item = (&FieldPath, &FieldValue)> {
        self.values.iter()
    }
}

fn collect_defaults(
    fields: &[FieldSpec],
    parent: Option<&FieldPath>,
    values: &mut BTreeMap<FieldPath, FieldValue>,
) {
    for field in fields {
        let path = match parent {
            Some(parent) => parent.child(&field.name),
            None => FieldPath::root(&field.name),
        };

        if !field.kind.holds_value() {
            collect_defaults(&field.children, Some(&path), values);
            continue;
        }

        let options = field.options.as_ref();
        let default = match field.kind {
            FieldKind::Enum => options
                .and_then(|o| o.options.first())
                .map(|first| FieldValue::String(first.clone())),
            // Zero pulled into the declared range
            FieldKind::Number => options.map(|o| {
                let low = o.min.unwrap_or(f64::MIN);
                let high = o.max.unwrap_or(f64::MAX);
                FieldValue::Number(0.0f64.max(low).min(high))
            }),
            _ => None,
        };

        if let Some(value) = default.or_else(|| FieldValue::default_for(field.kind)) {
            values.insert(path, value);
        }
    }
}

impl ScriptInstance for PropertyTable {
    fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn get(&self, path: &FieldPath) -> Option<FieldValue> {
        self.values.get(path).cloned()
    }

    fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), FieldError> {
        let spec = FieldSpec::find(&self.fields, path)
            .ok_or_else(|| FieldError::UnknownField(path.clone()))?;
        spec.validate(path, &value)?;
        self.values.insert(path.clone(), value);
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn ScriptInstance> {
        Box::new(self.clone())
    }

    fn retarget(&mut self, target: ObjectId) {
        self.target = target;
    }
}
