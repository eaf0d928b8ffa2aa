//! Entity payloads attached to a search result or detail record.
//!
//! The server extracts typed values (`url`, `email`, `phone`, `date`, ...)
//! from OCR text and also reports which OCR blocks each entity type covers.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping of entity type → extracted values.
///
/// Type order is the order the server sent them in; within a type the
/// first value is the canonical one. Types with no values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    entries: Vec<(String, Vec<String>)>,
}

impl ExtractedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append values for an entity type. A repeated type extends the
    /// existing list instead of creating a second entry.
    pub fn insert(&mut self, kind: impl Into<String>, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        let kind = kind.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => existing.extend(values),
            None => self.entries.push((kind, values)),
        }
    }

    pub fn with(mut self, kind: impl Into<String>, values: &[&str]) -> Self {
        self.insert(kind, values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Canonical (index-0) value for an entity type.
    pub fn first(&self, kind: &str) -> Option<&str> {
        self.values(kind).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn values(&self, kind: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate entity types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractedEntities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, values) in &self.entries {
            map.serialize_entry(kind, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractedEntities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntitiesVisitor;

        impl<'de> Visitor<'de> for EntitiesVisitor {
            type Value = ExtractedEntities;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity type to a list of string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entities = ExtractedEntities::new();
                while let Some((kind, values)) = access.next_entry::<String, Vec<String>>()? {
                    entities.insert(kind, values);
                }
                Ok(entities)
            }
        }

        deserializer.deserialize_map(EntitiesVisitor)
    }
}

/// Entity type → indices of the OCR blocks that entity covers.
///
/// Indices are positions into the image's `OcrBlock` list. Indices past the
/// end are kept as-is and simply never match a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityBlockIndex(HashMap<String, Vec<usize>>);

impl EntityBlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: impl Into<String>, indices: Vec<usize>) {
        self.0.insert(kind.into(), indices);
    }

    /// Set of block indices covered by `kind`; empty when the type is unknown.
    pub fn indices_for(&self, kind: &str) -> HashSet<usize> {
        self.0
            .get(kind)
            .map(|idxs| idxs.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<usize>>> for EntityBlockIndex {
    fn from(map: HashMap<String, Vec<usize>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_server_key_order() {
        let json = r#"{"phone": ["555"], "url": ["https://a.io"], "date": ["1/2/25"]}"#;
        let entities: ExtractedEntities = serde_json::from_str(json).unwrap();
        let kinds: Vec<_> = entities.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec!["phone", "url", "date"]);
    }

    #[test]
    fn first_value_is_canonical() {
        let entities = ExtractedEntities::new().with("email", &["a@b.com", "c@d.com"]);
        assert_eq!(entities.first("email"), Some("a@b.com"));
        assert_eq!(entities.first("url"), None);
    }

    #[test]
    fn empty_value_lists_are_dropped() {
        let entities: ExtractedEntities =
            serde_json::from_str(r#"{"url": [], "email": ["x@y.z"]}"#).unwrap();
        assert_eq!(entities.len(), 1);
        assert!(entities.values("url").is_none());
    }

    #[test]
    fn serializes_back_in_order() {
        let entities = ExtractedEntities::new()
            .with("date", &["22 Nov 2025"])
            .with("code", &["X1"]);
        let json = serde_json::to_string(&entities).unwrap();
        assert_eq!(json, r#"{"date":["22 Nov 2025"],"code":["X1"]}"#);
    }

    #[test]
    fn unknown_entity_has_no_indices() {
        let mut index = EntityBlockIndex::new();
        index.insert("email", vec![0, 3, 3]);
        assert_eq!(index.indices_for("email").len(), 2);
        assert!(index.indices_for("phone").is_empty());
    }
}
