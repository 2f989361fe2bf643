//! Merging newly parsed entries into an existing configuration.
//!
//! Responsibilities:
//! - Combine a base entry set with incoming entries under last-write-wins.
//! - Report which keys were introduced or changed by a merge.
//!
//! Invariants:
//! - Keys already present keep their position; new keys are appended in
//!   first-seen order.
//! - The value seen latest in `existing ++ incoming` wins.
//! - An empty `incoming` leaves the mapping untouched.

use indexmap::IndexMap;

use super::entry::{EnvMap, OrderedEntries};

/// Keys touched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Keys that did not exist before the merge, in insertion order.
    pub added: Vec<String>,
    /// Pre-existing keys whose value changed.
    pub updated: Vec<String>,
}

impl MergeStats {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

/// Merge `incoming` over `existing`, returning the materialized mapping.
pub fn merge_entries(existing: &OrderedEntries, incoming: &OrderedEntries) -> EnvMap {
    let mut merged = existing.materialize();
    merge_into(&mut merged, incoming);
    merged
}

/// Merge `incoming` into `target` in place.
///
/// A key counts as updated only when its final value differs from the one it
/// held before the merge.
pub fn merge_into(target: &mut EnvMap, incoming: &OrderedEntries) -> MergeStats {
    // first-seen incoming keys mapped to their pre-merge value
    let mut before: IndexMap<&str, Option<String>> = IndexMap::new();

    for entry in incoming {
        before
            .entry(entry.key.as_str())
            .or_insert_with(|| target.get(entry.key.as_str()).cloned());
        target.insert(entry.key.clone(), entry.value.clone());
    }

    let mut stats = MergeStats::default();
    for (key, previous) in before {
        match previous {
            None => stats.added.push(key.to_string()),
            Some(previous) if target.get(key) != Some(&previous) => {
                stats.updated.push(key.to_string())
            }
            Some(_) => {}
        }
    }

    stats
}
