//! Render contract for script fields.
//!
//! [`render`] turns field declarations plus a live instance into a tree of
//! [`RenderedField`]s, each naming the control the inspector should show.
//! The inspector itself is not part of this crate.

use void_core::ObjectId;

use crate::field::{FieldKind, FieldOptions, FieldPath, FieldSpec, FieldValue};
use crate::instance::ScriptInstance;

/// Hint shown in an empty text input when the script gave none.
pub const DEFAULT_HINT_TEXT: &str = "Please input a string";

/// What a picker dialog lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickScope {
    File,
    GameObject,
}

/// Control chosen for a field.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    TextInput {
        hint_text: String,
    },
    NumberInput {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Toggle {
        label_left: bool,
    },
    Dropdown {
        choices: Vec<String>,
    },
    /// Picker button; `title` is the current path or object name
    Picker {
        scope: PickScope,
        title: String,
    },
    Group {
        children: Vec<RenderedField>,
    },
}

/// A field ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedField {
    pub path: FieldPath,
    pub kind: FieldKind,
    /// Populated options; `label` and `value` are always filled in
    pub options: FieldOptions,
    /// Enclosing group name
    pub parent: Option<String>,
    pub control: Control,
}

impl RenderedField {
    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn label(&self) -> &str {
        self.options.label.as_deref().unwrap_or("")
    }

    /// Current value; `None` for groups.
    pub fn value(&self) -> Option<&FieldValue> {
        self.options.value.as_ref()
    }

    /// Object id a game object field points at.
    pub fn object_id(&self) -> Option<ObjectId> {
        self.value().and_then(FieldValue::as_object).map(|obj| obj.id)
    }

    /// Depth-first walk over this field and its group members.
    pub fn walk(&self) -> Vec<&RenderedField> {
        let mut out = vec![self];
        if let Control::Group { children } = &self.control {
            for child in children {
                out.extend(child.walk());
            }
        }
        out
    }
}

/// Render every declared field of `instance`.
///
/// A value field whose current value cannot be read is logged and left
/// out; its siblings still render.
pub fn render(instance: &dyn ScriptInstance) -> Vec<RenderedField> {
    render_level(instance, instance.fields(), None)
}

fn render_level(
    instance: &dyn ScriptInstance,
    fields: &[FieldSpec],
    group: Option<&FieldPath>,
) -> Vec<RenderedField> {
    fields
        .iter()
        .filter_map(|field| render_field(instance, field, group))
        .collect()
}

fn render_field(
    instance: &dyn ScriptInstance,
    field: &FieldSpec,
    group: Option<&FieldPath>,
) -> Option<RenderedField> {
    let path = match group {
        Some(group) => group.child(&field.name),
        None => FieldPath::root(&field.name),
    };

    let mut options = field.options_or_default();
    options.label = Some(humanize(&field.name));

    if field.kind.holds_value() {
        let Some(value) = instance.get(&path) else {
            log::error!("Field {} has no readable value", path);
            return None;
        };
        options.value = Some(value);
    }

    let control = match field.kind {
        FieldKind::String => Control::TextInput {
            hint_text: options
                .hint_text
                .clone()
                .unwrap_or_else(|| DEFAULT_HINT_TEXT.to_string()),
        },
        FieldKind::Number => Control::NumberInput {
            min: options.min,
            max: options.max,
            step: options.step,
        },
        FieldKind::Boolean => Control::Toggle { label_left: true },
        FieldKind::Enum => Control::Dropdown {
            choices: options.options.clone(),
        },
        FieldKind::File => Control::Picker {
            scope: PickScope::File,
            title: options
                .value
                .as_ref()
                .and_then(FieldValue::as_str)
                .unwrap_or("")
                .to_string(),
        },
        FieldKind::GameObject => Control::Picker {
            scope: PickScope::GameObject,
            title: options
                .value
                .as_ref()
                .and_then(FieldValue::as_object)
                .map(|obj| obj.name.clone())
                .unwrap_or_default(),
        },
        FieldKind::Group => Control::Group {
            children: render_level(instance, &field.children, Some(&path)),
        },
    };

    Some(RenderedField {
        parent: path.parent().map(str::to_string),
        path,
        kind: field.kind,
        options,
        control,
    })
}

/// Turn an identifier into a label: `moveSpeed` becomes `Move Speed`.
///
/// Runs of capitals stay together (`maxHP` is `Max HP`, `HTTPPort` is
/// `HTTP Port`) and underscores or dashes separate words.
pub fn humanize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
