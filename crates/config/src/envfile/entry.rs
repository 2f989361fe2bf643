//! Entry types produced by the env-file parser.
//!
//! Responsibilities:
//! - Define `Entry` (one key/value pair) and `OrderedEntries` (appearance-ordered sequence).
//! - Collapse a sequence into a duplicate-free `EnvMap` (materialization).
//!
//! Does NOT handle:
//! - Tokenizing text (see `parser.rs`).
//! - Combining two entry sets (see `merge.rs`).
//!
//! Invariants:
//! - `OrderedEntries` preserves insertion order and may hold repeated keys.
//! - Materialization is last-write-wins; a key keeps the position of its first occurrence.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Duplicate-free key/value mapping that remembers key order.
pub type EnvMap = IndexMap<String, String>;

/// A single configuration key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Entries in order of appearance. Repeated keys are kept until materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedEntries(Vec<Entry>);

impl OrderedEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.0
    }

    /// Collapse into a mapping, later values overwriting earlier ones.
    pub fn materialize(&self) -> EnvMap {
        let mut map = EnvMap::with_capacity(self.0.len());
        for entry in &self.0 {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        map
    }
}

impl From<Vec<Entry>> for OrderedEntries {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl From<&EnvMap> for OrderedEntries {
    fn from(map: &EnvMap) -> Self {
        map.iter().map(|(k, v)| Entry::new(k.clone(), v.clone())).collect()
    }
}

impl FromIterator<Entry> for OrderedEntries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for OrderedEntries {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedEntries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
