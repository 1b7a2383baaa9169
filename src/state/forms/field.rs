//! Form field value objects

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text, including numbers typed as text
    Text(String),
    /// A single option picked from a select box (empty when nothing is picked)
    Choice(String),
    /// Checkbox list, kept in option order
    Multi(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Returns true when the value counts as absent
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.is_empty(),
            FieldValue::Multi(items) => items.is_empty(),
        }
    }

    /// Get the text value (returns empty string for multi-select fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s,
            FieldValue::Multi(_) => "",
        }
    }

    /// Get the selected items (empty for single-valued fields)
    pub fn as_items(&self) -> &[String] {
        match self {
            FieldValue::Multi(items) => items,
            _ => &[],
        }
    }
}

/// Kind of input widget a field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Single-line text restricted to numeric characters
    Number,
    Multiline,
    /// Select box; `placeholder` adds an empty leading option
    Select {
        options: &'static [&'static str],
        placeholder: Option<&'static str>,
    },
    /// Checkbox list
    MultiSelect { options: &'static [&'static str] },
}

impl FieldKind {
    /// Value a freshly mounted field starts with
    pub fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Select { .. } => FieldValue::Choice(String::new()),
            FieldKind::MultiSelect { .. } => FieldValue::Multi(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Options a select box cycles through, including the empty placeholder slot
    pub fn cycle_options(&self) -> Vec<&'static str> {
        match self {
            FieldKind::Select {
                options,
                placeholder,
            } => {
                let mut all = Vec::with_capacity(options.len() + 1);
                if placeholder.is_some() {
                    all.push("");
                }
                all.extend_from_slice(options);
                all
            }
            FieldKind::MultiSelect { options } => options.to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Multiline)
    }

    /// Whether typed characters edit the value directly
    pub fn accepts_typing(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Number | FieldKind::Multiline
        )
    }

    /// Whether a typed character is allowed for this kind
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Text | FieldKind::Multiline => true,
            _ => false,
        }
    }
}

/// Current values of one mounted form, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FormValues {
    pub fn new(entries: Vec<(&'static str, FieldValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Text of a field, empty when the field is unknown or multi-valued
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Replace a field value. Returns false when the field is unknown.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
