//! Value snapshots and change sets exchanged with callers.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::Schema;

/// Current (or desired) state of one directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub value: String,
    /// `false` when the directive is commented out (or absent).
    pub enabled: bool,
    /// Line the directive was read from; `None` when it is not in the file.
    /// Ignored on input.
    #[serde(default, with = "line_index")]
    pub line_index: Option<usize>,
}

impl FieldValue {
    pub fn enabled(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: true,
            line_index: None,
        }
    }

    pub fn disabled(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: false,
            line_index: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.line_index.is_none()
    }
}

/// Wire form of the line index: an integer, `-1` for absent.
mod line_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(index: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match index {
            Some(i) => s.serialize_u64(*i as u64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.and_then(|i| usize::try_from(i).ok()))
    }
}

/// One value per field of a schema, as read from the target file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedConfig {
    pub schema: Schema,
    pub values: HashMap<String, FieldValue>,
}

impl ParsedConfig {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// The parsed values as a change set, in schema field order. Applying it
    /// back to the same file writes nothing.
    pub fn to_changes(&self) -> ChangeSet {
        self.schema
            .fields
            .iter()
            .filter_map(|f| self.values.get(&f.key).map(|v| (f.key.clone(), v.clone())))
            .collect()
    }
}

/// Requested values keyed by field key, applied in insertion order.
///
/// Serialized as a JSON object; key order of the incoming document is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<(String, FieldValue)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change. A later change for the same key replaces the earlier one
    /// but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut changes = ChangeSet::new();
        for (key, value) in iter {
            changes.insert(key, value);
        }
        changes
    }
}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChangeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChangeSetVisitor;

        impl<'de> Visitor<'de> for ChangeSetVisitor {
            type Value = ChangeSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ChangeSet, A::Error> {
                let mut changes = ChangeSet::new();
                while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
                    changes.insert(key, value);
                }
                Ok(changes)
            }
        }

        deserializer.deserialize_map(ChangeSetVisitor)
    }
}
