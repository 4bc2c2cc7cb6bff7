//! Field descriptor protocol.
//!
//! A script declares its editable properties as [`FieldSpec`]s. Each spec
//! carries a [`FieldKind`] that decides which control the inspector shows
//! and which [`FieldValue`] shapes the field accepts.

use std::collections::BTreeMap;
use std::fmt;

use void_core::ObjectId;

use crate::error::FieldError;

/// The seven field kinds a script may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Enum,
    File,
    GameObject,
    Group,
}

impl FieldKind {
    /// Parse a declaration tag such as `"NUMBER"`.
    pub fn from_tag(tag: &str) -> Result<Self, FieldError> {
        match tag {
            "STRING" => Ok(FieldKind::String),
            "NUMBER" => Ok(FieldKind::Number),
            "BOOLEAN" => Ok(FieldKind::Boolean),
            "ENUM" => Ok(FieldKind::Enum),
            "FILE" => Ok(FieldKind::File),
            "GAMEOBJECT" => Ok(FieldKind::GameObject),
            "GROUP" => Ok(FieldKind::Group),
            other => Err(FieldError::InvalidFieldType(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::Number => "NUMBER",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Enum => "ENUM",
            FieldKind::File => "FILE",
            FieldKind::GameObject => "GAMEOBJECT",
            FieldKind::Group => "GROUP",
        }
    }

    /// Groups only contain other fields.
    pub fn holds_value(&self) -> bool {
        !matches!(self, FieldKind::Group)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Reference to a game object picked into a `GAMEOBJECT` field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub name: String,
}

impl ObjectRef {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Value held by a field.
///
/// `STRING`, `ENUM` and `FILE` fields hold strings (a file field holds the
/// picked path).
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Object(Option<ObjectRef>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Object(_) => "game object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            FieldValue::Object(obj) => obj.as_ref(),
            _ => None,
        }
    }

    /// Zero value for a kind; `None` for groups.
    pub fn default_for(kind: FieldKind) -> Option<FieldValue> {
        match kind {
            FieldKind::String | FieldKind::Enum | FieldKind::File => {
                Some(FieldValue::String(String::new()))
            }
            FieldKind::Number => Some(FieldValue::Number(0.0)),
            FieldKind::Boolean => Some(FieldValue::Boolean(false)),
            FieldKind::GameObject => Some(FieldValue::Object(None)),
            FieldKind::Group => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(obj: ObjectRef) -> Self {
        FieldValue::Object(Some(obj))
    }
}

/// Location of a field: its name preceded by the names of enclosing groups.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path of a top-level field.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Path of a field nested in this group.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Parse a dotted path such as `movement.speed`.
    ///
    /// Field names never contain `.`; manifests drop fields that do.
    pub fn parse(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }

    /// The field's own name.
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Name of the immediately enclosing group.
    pub fn parent(&self) -> Option<&str> {
        let len = self.0.len();
        if len < 2 {
            None
        } else {
            Some(&self.0[len - 2])
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Display and validation options of a field.
///
/// `label` and `value` are filled in just before rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldOptions {
    pub label: Option<String>,
    pub value: Option<FieldValue>,
    pub hint_text: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    /// Ordered choices of an `ENUM` field
    pub options: Vec<String>,
    /// Any other option, passed through to the control untouched
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FieldOptions {
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint_text = Some(hint.into());
        self
    }
}

/// Declaration of one editable property.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub options: Option<FieldOptions>,
    /// Name of the enclosing group, set while rendering
    pub parent: Option<String>,
    /// Member fields, `GROUP` only
    pub children: Vec<FieldSpec>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>, children: Vec<FieldSpec>) -> Self {
        Self {
            children,
            ..Self::new(name, FieldKind::Group)
        }
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Options, or the empty default when none were declared.
    pub fn options_or_default(&self) -> FieldOptions {
        self.options.clone().unwrap_or_default()
    }

    /// Check that `value` fits this field.
    pub fn validate(&self, path: &FieldPath, value: &FieldValue) -> Result<(), FieldError> {
        let mismatch = || FieldError::TypeMismatch {
            path: path.clone(),
            expected: self.kind,
            found: value.type_name(),
        };

        match (self.kind, value) {
            (FieldKind::Group, _) => Err(FieldError::NotSettable(path.clone())),
            (FieldKind::String | FieldKind::File, FieldValue::String(_)) => Ok(()),
            (FieldKind::Enum, FieldValue::String(choice)) => {
                let options = self.options.as_ref().map(|o| o.options.as_slice()).unwrap_or(&[]);
                if options.iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(FieldError::InvalidChoice {
                        path: path.clone(),
                        value: choice.clone(),
                    })
                }
            }
            (FieldKind::Number, FieldValue::Number(n)) => {
                let options = self.options.as_ref();
                let below = options.and_then(|o| o.min).is_some_and(|min| *n < min);
                let above = options.and_then(|o| o.max).is_some_and(|max| *n > max);
                if n.is_nan() || below || above {
                    Err(FieldError::OutOfRange {
                        path: path.clone(),
                        value: *n,
                    })
                } else {
                    Ok(())
                }
            }
            (FieldKind::Boolean, FieldValue::Boolean(_)) => Ok(()),
            (FieldKind::GameObject, FieldValue::Object(_)) => Ok(()),
            _ => Err(mismatch()),
        }
    }

    /// Find a nested field by path, starting at this level.
    pub fn find<'a>(fields: &'a [FieldSpec], path: &FieldPath) -> Option<&'a FieldSpec> {
        let mut level = fields;
        let mut found = None;
        for segment in path.segments() {
            let spec = level.iter().find(|f| &f.name == segment)?;
            level = &spec.children;
            found = Some(spec);
        }
        found
    }
}
