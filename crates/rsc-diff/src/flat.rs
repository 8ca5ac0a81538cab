//! Flat path diff: compare two untyped documents key path by key path.
//!
//! Both documents are flattened into `path -> value` maps and compared as
//! sets of paths. Nothing here knows about schema versions or identity keys,
//! so a reordered list shows up as differing indices.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{DiffError, DiffResult};

/// Paths that appear on one side only, or on both with different values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDiff {
    pub only_in_base: Vec<String>,
    pub only_in_head: Vec<String>,
    pub differing: Vec<String>,
}

impl FlatDiff {
    /// Returns `true` if both documents flatten to the same map.
    pub fn is_empty(&self) -> bool {
        self.only_in_base.is_empty() && self.only_in_head.is_empty() && self.differing.is_empty()
    }

    /// Total number of reported paths.
    pub fn len(&self) -> usize {
        self.only_in_base.len() + self.only_in_head.len() + self.differing.len()
    }
}

/// Diff two raw JSON or YAML documents.
pub fn diff_flat(base: &str, head: &str) -> DiffResult<FlatDiff> {
    let base = parse_object(base, "base")?;
    let head = parse_object(head, "head")?;
    diff_flat_values(&base, &head)
}

/// Diff two already parsed documents. Both must be objects at the top level.
pub fn diff_flat_values(base: &Value, head: &Value) -> DiffResult<FlatDiff> {
    require_object(base, "base")?;
    require_object(head, "head")?;

    let base = flatten(base);
    let head = flatten(head);

    let mut diff = FlatDiff::default();
    for (path, value) in &base {
        match head.get(path) {
            None => diff.only_in_base.push(path.clone()),
            Some(other) if other != value => diff.differing.push(path.clone()),
            Some(_) => {}
        }
    }
    diff.only_in_head = head
        .keys()
        .filter(|path| !base.contains_key(*path))
        .cloned()
        .collect();

    debug!(
        only_in_base = diff.only_in_base.len(),
        only_in_head = diff.only_in_head.len(),
        differing = diff.differing.len(),
        "flat diff computed"
    );
    Ok(diff)
}

/// Flatten a tree into dotted paths.
///
/// Array indices become path segments. Empty arrays and objects are kept as
/// leaves (`[]` and `{}`). Leaf values are rendered as compact JSON.
///
/// Object keys are escaped so that distinct trees never share a path: `\`
/// becomes `\\`, `.` becomes `\.`, and an all-digit key gets a leading `\`
/// to keep it apart from an array index.
pub fn flatten(value: &Value) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(key_segment(key), child, &mut out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(index.to_string(), child, &mut out);
            }
        }
        leaf => {
            out.insert(String::new(), leaf.to_string());
        }
    }
    out
}

fn flatten_into(path: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(format!("{path}.{}", key_segment(key)), child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(format!("{path}.{index}"), child, out);
            }
        }
        leaf => {
            out.insert(path, leaf.to_string());
        }
    }
}

fn key_segment(key: &str) -> String {
    let mut segment = String::with_capacity(key.len() + 1);
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        segment.push('\\');
    }
    for c in key.chars() {
        if c == '\\' || c == '.' {
            segment.push('\\');
        }
        segment.push(c);
    }
    segment
}

fn parse_object(text: &str, side: &str) -> DiffResult<Value> {
    let (_, value) = rsc_types::parse_value(text)
        .map_err(|e| DiffError::NotComparable(format!("{side}: {e}")))?;
    Ok(value)
}

fn require_object(value: &Value, side: &str) -> DiffResult<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(DiffError::NotComparable(format!(
            "{side}: top-level value is not an object"
        )))
    }
}
