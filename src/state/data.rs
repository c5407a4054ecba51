/// Shared data structures for the viewer state
///
/// These structs represent the node annotations as they are read
/// from disk and handed to the navigator.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, ViewerError};

/// A single annotated node
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NodeRecord {
    /// Free text shown in the description field
    pub description: Option<String>,
    /// Photo filenames, relative to the picture directory
    pub photo_paths: Option<Vec<String>>,
    /// Older annotation files stored a single photo under this key
    pub photo_path: Option<String>,
}

impl NodeRecord {
    /// All photos of this node, in display order
    pub fn photos(&self) -> Vec<&str> {
        match &self.photo_paths {
            Some(paths) if !paths.is_empty() => paths.iter().map(String::as_str).collect(),
            _ => self.photo_path.iter().map(String::as_str).collect(),
        }
    }

    /// The photo shown in the primary container, if any
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos().first().copied()
    }
}

/// Node records keyed by identifier, in the order they appear in the source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeCollection {
    entries: Vec<(String, NodeRecord)>,
}

impl NodeCollection {
    /// Parse a JSON object of node records
    ///
    /// The top level must be an object. Every value must deserialize into a
    /// [`NodeRecord`]; the first one that doesn't fails the whole load.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: OrderedEntries = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(raw.0.len());
        for (id, value) in raw.0 {
            let record = serde_json::from_value(value)
                .map_err(|source| ViewerError::Record { id: id.clone(), source })?;
            entries.push((id, record));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifier and record at a position in key order
    pub fn get_index(&self, index: usize) -> Option<(&str, &NodeRecord)> {
        self.entries
            .get(index)
            .map(|(id, record)| (id.as_str(), record))
    }

    /// Position of a node identifier in key order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == id)
    }

    /// Node identifiers in navigation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

/// Raw `(key, value)` pairs in document order
///
/// A repeated key keeps its first position and takes the last value.
struct OrderedEntries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping node ids to records")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let capacity = map.size_hint().unwrap_or(0);
                let mut entries: Vec<(String, serde_json::Value)> = Vec::with_capacity(capacity);
                let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);

                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    match positions.get(&key) {
                        Some(&slot) => entries[slot].1 = value,
                        None => {
                            positions.insert(key.clone(), entries.len());
                            entries.push((key, value));
                        }
                    }
                }

                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
