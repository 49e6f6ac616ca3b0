//! Recursive, non-mutating union of two raw mappings.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{Key, RawMapping, Value};

/// Combine `left` and `right` into a new mapping.
///
/// Behaviour:
/// - The result starts from `left`'s entries in `left`'s order.
/// - Keys only in `right` are appended in `right`'s order.
/// - When both sides hold a mapping for the same key, the two are merged
///   recursively into a fresh mapping.
/// - Any other conflict (scalars, sequences, mismatched types) is won by
///   `right`.
///
/// Neither input is modified. Entries that are not merged keep sharing their
/// nested mappings with the input they came from.
///
/// # Examples
///
/// ```rust
/// use attrmap::{RawMapping, Value, merge};
///
/// let sub = |pairs: &[(&str, i64)]| -> Value {
///     Value::Map(pairs.iter().map(|&(k, v)| (k, v)).collect())
/// };
/// let left: RawMapping = [("a", Value::Int(1)), ("sub", sub(&[("x", 1)]))].into_iter().collect();
/// let right: RawMapping = [("a", Value::Int(2)), ("sub", sub(&[("y", 2)]))].into_iter().collect();
///
/// let merged = merge(&left, &right);
/// let expected: RawMapping = [("a", Value::Int(2)), ("sub", sub(&[("x", 1), ("y", 2)]))]
///     .into_iter()
///     .collect();
/// assert_eq!(merged, expected);
/// ```
#[must_use]
pub fn merge(left: &RawMapping, right: &RawMapping) -> RawMapping {
    let merged = merge_tables(left, right, &mut MergeMemo::default());
    tracing::debug!(
        left = left.len(),
        right = right.len(),
        merged = merged.len(),
        "merged mappings"
    );
    merged
}

/// Results already started, keyed by the pair of source tables, so operands
/// that contain themselves merge into a result that contains itself.
#[derive(Default)]
struct MergeMemo(HashMap<(usize, usize), RawMapping>);

fn merge_tables(left: &RawMapping, right: &RawMapping, memo: &mut MergeMemo) -> RawMapping {
    let pair = (left.addr(), right.addr());
    if let Some(started) = memo.0.get(&pair) {
        return started.clone();
    }
    let merged = RawMapping::new();
    memo.0.insert(pair, merged.clone());
    let mut table: IndexMap<Key, Value> = left.entries().into_iter().collect();
    for (key, incoming) in right.entries() {
        let combined = match (table.get(&key), incoming) {
            (Some(Value::Map(ours)), Value::Map(theirs)) => {
                Value::Map(merge_tables(ours, &theirs, memo))
            }
            (_, theirs) => theirs,
        };
        table.insert(key, combined);
    }
    merged.fill(table);
    merged
}
