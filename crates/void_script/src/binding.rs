//! Script bindings - one script instance attached to one game object.

use std::fmt;

use void_core::ObjectId;

use crate::control::{render, RenderedField};
use crate::error::{FieldError, ScriptResult};
use crate::field::{FieldKind, FieldPath, FieldSpec, FieldValue};
use crate::instance::ScriptInstance;
use crate::loader::ScriptLoaders;

/// A script's name and declared fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptDefinition {
    pub source_name: String,
    pub fields: Vec<FieldSpec>,
}

/// Emitted after every successful field write.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange {
    /// Game object owning the binding
    pub target: ObjectId,
    pub source_name: String,
    pub path: FieldPath,
    pub field_name: String,
    pub value: FieldValue,
    pub kind: FieldKind,
    /// Enclosing group, only for group members
    pub group_name: Option<String>,
    /// Picked object of a game object field
    pub object_id: Option<ObjectId>,
}

/// A script instance bound to exactly one game object.
pub struct ScriptBinding {
    source_name: String,
    target: ObjectId,
    instance: Box<dyn ScriptInstance>,
}

impl ScriptBinding {
    pub fn new(
        source_name: impl Into<String>,
        target: ObjectId,
        instance: Box<dyn ScriptInstance>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            target,
            instance,
        }
    }

    /// Instantiate `source` through the matching loader.
    pub fn load(
        loaders: &ScriptLoaders,
        source_name: &str,
        source: &str,
        target: ObjectId,
    ) -> ScriptResult<Self> {
        let instance = loaders.load(source_name, source, target)?;
        Ok(Self::new(source_name, target, instance))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.instance.fields()
    }

    pub fn definition(&self) -> ScriptDefinition {
        ScriptDefinition {
            source_name: self.source_name.clone(),
            fields: self.instance.fields().to_vec(),
        }
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldSpec> {
        FieldSpec::find(self.instance.fields(), path)
    }

    pub fn get(&self, path: &FieldPath) -> Option<FieldValue> {
        self.instance.get(path)
    }

    /// Fields ready for the inspector.
    pub fn render(&self) -> Vec<RenderedField> {
        render(self.instance.as_ref())
    }

    /// Write a field and describe the change.
    pub fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<FieldChange, FieldError> {
        let kind = self
            .field(path)
            .map(|spec| spec.kind)
            .ok_or_else(|| FieldError::UnknownField(path.clone()))?;
        if !kind.holds_value() {
            return Err(FieldError::NotSettable(path.clone()));
        }

        self.instance.set(path, value.clone())?;

        Ok(FieldChange {
            target: self.target,
            source_name: self.source_name.clone(),
            path: path.clone(),
            field_name: path.name().to_string(),
            object_id: value.as_object().map(|obj| obj.id),
            value,
            kind,
            group_name: path.parent().map(str::to_string),
        })
    }

    /// Copy this binding onto another game object.
    pub fn duplicate_for(&self, target: ObjectId) -> Self {
        let mut instance = self.instance.box_clone();
        instance.retarget(target);
        Self::new(self.source_name.clone(), target, instance)
    }

    /// Same binding under a new script name, after the file was renamed.
    pub fn renamed(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    /// Copy current values into `other` where they still fit its fields.
    ///
    /// Returns how many values were carried over.
    pub fn carry_values_into(&self, other: &mut ScriptBinding) -> usize {
        let mut carried = 0;
        for path in value_paths(self.fields(), None) {
            let Some(value) = self.get(&path) else {
                continue;
            };
            if other.get(&path).as_ref() == Some(&value) {
                continue;
            }
            if other.instance.set(&path, value).is_ok() {
                carried += 1;
            }
        }
        carried
    }
}

fn value_paths(fields: &[FieldSpec], group: Option<&FieldPath>) -> Vec<FieldPath> {
    let mut paths = Vec::new();
    for field in fields {
        let path = match group {
            Some(group) => group.child(&field.name),
            None => FieldPath::root(&field.name),
        };
        if field.kind.holds_value() {
            paths.push(path);
        } else {
            paths.extend(value_paths(&field.children, Some(&path)));
        }
    }
    paths
}

impl Clone for ScriptBinding {
    fn clone(&self) -> Self {
        Self {
            source_name: self.source_name.clone(),
            target: self.target,
            instance: self.instance.box_clone(),
        }
    }
}

impl fmt::Debug for ScriptBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptBinding")
            .field("source_name", &self.source_name)
            .field("target", &self.target)
            .field("fields", &self.instance.fields().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldOptions, ObjectRef};
    use crate::instance::PropertyTable;

    fn binding() -> ScriptBinding {
        let fields = vec![
            FieldSpec::new("speed", FieldKind::Number)
                .with_options(FieldOptions::default().with_range(0.0, 10.0)),
            FieldSpec::group(
                "camera",
                vec![FieldSpec::new("target", FieldKind::GameObject)],
            ),
        ];
        let target = ObjectId::new(0, 0);
        ScriptBinding::new("player.js", target, Box::new(PropertyTable::new(fields, target)))
    }

    #[test]
    fn test_set_reports_change() {
        let mut binding = binding();

        let change = binding.set(&FieldPath::root("speed"), 4.0.into()).unwrap();
        assert_eq!(change.field_name, "speed");
        assert_eq!(change.kind, FieldKind::Number);
        assert_eq!(change.group_name, None);
        assert_eq!(change.object_id, None);

        let lamp = ObjectRef::new(ObjectId::new(7, 2), "Lamp");
        let change = binding
            .set(&FieldPath::parse("camera.target"), lamp.into())
            .unwrap();
        assert_eq!(change.group_name.as_deref(), Some("camera"));
        assert_eq!(change.object_id, Some(ObjectId::new(7, 2)));
    }

    #[test]
    fn test_group_not_settable() {
        let mut binding = binding();
        assert_eq!(
            binding.set(&FieldPath::root("camera"), true.into()),
            Err(FieldError::NotSettable(FieldPath::root("camera")))
        );
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = binding();
        let copy = original.duplicate_for(ObjectId::new(1, 0));

        original.set(&FieldPath::root("speed"), 9.0.into()).unwrap();
        assert_eq!(copy.target(), ObjectId::new(1, 0));
        assert_eq!(copy.get(&FieldPath::root("speed")), Some(0.0.into()));
    }

    #[test]
    fn test_carry_values() {
        let mut old = binding();
        old.set(&FieldPath::root("speed"), 3.0.into()).unwrap();

        let target = ObjectId::new(0, 0);
        let narrower = vec![FieldSpec::new("speed", FieldKind::Number)
            .with_options(FieldOptions::default().with_range(0.0, 2.0))];
        let mut fresh =
            ScriptBinding::new("player.js", target, Box::new(PropertyTable::new(narrower, target)));

        assert_eq!(old.carry_values_into(&mut fresh), 0);
        assert_eq!(fresh.get(&FieldPath::root("speed")), Some(0.0.into()));
    }
}
