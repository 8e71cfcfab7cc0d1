//! Shallow-set and deep-merge over settings documents.
//!
//! Both operations leave their input untouched and report what changed.
//! Deep-merge is the profile-apply workhorse: objects merge recursively,
//! everything else (arrays included) is replaced wholesale, and every
//! replacement of a differing existing value is recorded as a conflict
//! rather than aborting the merge.

pub mod path;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::document::{value_type_name, Document};
use crate::error::SettingsError;
use path::child_path;
pub use path::KeyPath;

/// One leaf replacement where the base already held a different value.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub path: String,
    pub old: Value,
    pub new: Value,
}

/// Outcome of a merge: the resulting document plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub document: Document,
    /// Dotted paths of every key that was added or replaced.
    pub changed_keys: BTreeSet<String>,
    /// Replacements of differing existing values, in discovery order.
    pub conflicts: Vec<Conflict>,
}

impl MergeResult {
    pub fn changed(&self) -> bool {
        !self.changed_keys.is_empty()
    }
}

/// Sets a single leaf value, creating intermediate objects along the way.
///
/// An intermediate that exists but is not an object fails with
/// `InvalidKeyPath`; the base document is never mutated.
pub fn shallow_set(
    base: &Document,
    path: &KeyPath,
    value: Value,
) -> Result<MergeResult, SettingsError> {
    let mut document = base.clone();
    {
        let mut current = &mut document;
        for segment in path.parents() {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Document::new()));
            current = match slot {
                Value::Object(map) => map,
                other => {
                    return Err(SettingsError::InvalidKeyPath {
                        path: path.as_str().to_string(),
                        reason: format!(
                            "segment '{}' is {}, not an object",
                            segment,
                            value_type_name(other)
                        ),
                    });
                }
            };
        }
        current.insert(path.leaf().to_string(), value);
    }

    let mut changed_keys = BTreeSet::new();
    changed_keys.insert(path.as_str().to_string());
    Ok(MergeResult {
        document,
        changed_keys,
        conflicts: Vec::new(),
    })
}

/// Reads the value at a key path, if present.
pub fn get_path<'a>(document: &'a Document, path: &KeyPath) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.parents() {
        match current.get(segment) {
            Some(Value::Object(map)) => current = map,
            _ => return None,
        }
    }
    current.get(path.leaf())
}

/// Recursively merges `overlay` into `base`. The overlay always wins;
/// arrays are replaced, never element-merged.
pub fn deep_merge(base: &Document, overlay: &Document) -> MergeResult {
    let mut document = base.clone();
    let mut changed_keys = BTreeSet::new();
    let mut conflicts = Vec::new();
    merge_object(&mut document, overlay, "", &mut changed_keys, &mut conflicts);
    MergeResult {
        document,
        changed_keys,
        conflicts,
    }
}

fn merge_object(
    base: &mut Document,
    overlay: &Document,
    prefix: &str,
    changed: &mut BTreeSet<String>,
    conflicts: &mut Vec<Conflict>,
) {
    for (key, overlay_value) in overlay {
        let path = child_path(prefix, key);
        if let Some(base_value) = base.get_mut(key) {
            if *base_value == *overlay_value {
                continue;
            }
            match (base_value, overlay_value) {
                (Value::Object(base_map), Value::Object(overlay_map)) => {
                    merge_object(base_map, overlay_map, &path, changed, conflicts);
                }
                (base_value, overlay_value) => {
                    conflicts.push(Conflict {
                        path: path.clone(),
                        old: base_value.clone(),
                        new: overlay_value.clone(),
                    });
                    changed.insert(path);
                    *base_value = overlay_value.clone();
                }
            }
        } else {
            changed.insert(path);
            base.insert(key.clone(), overlay_value.clone());
        }
    }
}
