//! JSON field manifests.
//!
//! A script declares its fields in a JSON block, either as the whole file or
//! inside a comment after an `@fields` marker:
//!
//! ```text
//! /* @fields
//! [
//!   { "name": "speed", "type": "NUMBER", "default": 2, "options": { "min": 0, "max": 10 } },
//!   { "name": "camera", "type": "GROUP", "children": [
//!     { "name": "follow", "type": "BOOLEAN", "default": true }
//!   ]}
//! ]
//! */
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use void_core::ObjectId;

use crate::error::{ScriptError, ScriptResult};
use crate::field::{FieldKind, FieldOptions, FieldPath, FieldSpec, FieldValue};
use crate::instance::{PropertyTable, ScriptInstance};
use crate::loader::ScriptLoader;

/// Marker that opens an embedded manifest.
pub const FIELDS_MARKER: &str = "@fields";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawManifest {
    Object { fields: Vec<RawField> },
    List(Vec<RawField>),
}

impl RawManifest {
    fn into_fields(self) -> Vec<RawField> {
        match self {
            RawManifest::Object { fields } | RawManifest::List(fields) => fields,
        }
    }
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    options: Option<RawOptions>,
    #[serde(default)]
    children: Vec<RawField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    hint_text: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawOptions> for FieldOptions {
    fn from(raw: RawOptions) -> Self {
        FieldOptions {
            hint_text: raw.hint_text,
            min: raw.min,
            max: raw.max,
            step: raw.step,
            options: raw.options,
            extra: raw.extra,
            ..FieldOptions::default()
        }
    }
}

/// Fields and declared defaults read from a manifest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    pub fields: Vec<FieldSpec>,
    pub defaults: Vec<(FieldPath, FieldValue)>,
}

impl Manifest {
    /// Parse the manifest of `source`.
    ///
    /// A source without a manifest declares no fields. Fields with an
    /// unknown type tag are logged and dropped.
    pub fn parse(source_name: &str, source: &str) -> ScriptResult<Self> {
        let Some(block) = manifest_block(source) else {
            return Ok(Self::default());
        };

        let raw: RawManifest =
            serde_json::from_str(block).map_err(|source| ScriptError::Manifest {
                name: source_name.to_string(),
                source,
            })?;

        let mut manifest = Self::default();
        manifest.fields = convert(source_name, raw.into_fields(), None, &mut manifest.defaults);
        Ok(manifest)
    }

    /// Instantiate for `target`, applying the declared defaults.
    pub fn instantiate(&self, source_name: &str, target: ObjectId) -> PropertyTable {
        let mut table = PropertyTable::new(self.fields.clone(), target);
        for (path, value) in &self.defaults {
            if let Err(err) = table.set(path, value.clone()) {
                log::warn!("Ignoring default of {} in {}: {}", path, source_name, err);
            }
        }
        table
    }
}

fn manifest_block(source: &str) -> Option<&str> {
    if let Some(start) = source.find(FIELDS_MARKER) {
        let rest = &source[start + FIELDS_MARKER.len()..];
        let end = rest.find("*/").unwrap_or(rest.len());
        return Some(rest[..end].trim());
    }

    let trimmed = source.trim();
    (trimmed.starts_with('{') || trimmed.starts_with('[')).then_some(trimmed)
}

fn convert(
    source_name: &str,
    raw: Vec<RawField>,
    group: Option<&FieldPath>,
    defaults: &mut Vec<(FieldPath, FieldValue)>,
) -> Vec<FieldSpec> {
    let mut fields = Vec::with_capacity(raw.len());

    for field in raw {
        if field.name.is_empty() || field.name.contains('.') {
            log::error!("Invalid field name {:?} in {}", field.name, source_name);
            continue;
        }

        let kind = match FieldKind::from_tag(&field.kind) {
            Ok(kind) => kind,
            Err(err) => {
                log::error!("{} ({}.{})", err, source_name, field.name);
                continue;
            }
        };

        let path = match group {
            Some(group) => group.child(&field.name),
            None => FieldPath::root(&field.name),
        };

        let mut spec = FieldSpec::new(field.name, kind);
        spec.options = field.options.map(FieldOptions::from);

        if kind == FieldKind::Group {
            spec.children = convert(source_name, field.children, Some(&path), defaults);
        } else if let Some(default) = field.default {
            match json_to_value(kind, &default) {
                Some(value) => defaults.push((path, value)),
                None => log::warn!(
                    "Default {} does not fit {} field {} in {}",
                    default,
                    kind,
                    path,
                    source_name
                ),
            }
        }

        fields.push(spec);
    }

    fields
}

fn json_to_value(kind: FieldKind, json: &Value) -> Option<FieldValue> {
    match (kind, json) {
        (FieldKind::String | FieldKind::Enum | FieldKind::File, Value::String(s)) => {
            Some(FieldValue::String(s.clone()))
        }
        (FieldKind::Number, Value::Number(n)) => n.as_f64().map(FieldValue::Number),
        (FieldKind::Boolean, Value::Bool(b)) => Some(FieldValue::Boolean(*b)),
        (FieldKind::GameObject, Value::Null) => Some(FieldValue::Object(None)),
        _ => None,
    }
}

/// Loader for scripts that describe their fields with a JSON manifest.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManifestLoader;

impl ScriptLoader for ManifestLoader {
    fn extensions(&self) -> &[&str] {
        &["js", "json"]
    }

    fn load(
        &self,
        source_name: &str,
        source: &str,
        target: ObjectId,
    ) -> ScriptResult<Box<dyn ScriptInstance>> {
        let manifest = Manifest::parse(source_name, source)?;
        log::debug!(
            "Loaded {} with {} top-level fields",
            source_name,
            manifest.fields.len()
        );
        Ok(Box::new(manifest.instantiate(source_name, target)))
    }
}
