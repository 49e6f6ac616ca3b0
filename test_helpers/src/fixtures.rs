//! JSON documents shared by the mapping test suites.
//!
//! Objects come back from `serde_json` with sorted keys, so tests that
//! depend on insertion order should build their mappings by hand.

use serde_json::{Value, json};

/// Left operand of the merge scenarios.
#[must_use]
pub fn merge_left() -> Value {
    json!({
        "foo": "bar",
        "mismatch": false,
        "sub": {"alpha": "beta", "a": "b"},
    })
}

/// Right operand of the merge scenarios.
#[must_use]
pub fn merge_right() -> Value {
    json!({
        "lorem": "ipsum",
        "mismatch": true,
        "sub": {"alpha": "bravo", "c": "d"},
    })
}

/// Expected result of merging [`merge_right`] over [`merge_left`].
#[must_use]
pub fn merged() -> Value {
    json!({
        "foo": "bar",
        "lorem": "ipsum",
        "mismatch": true,
        "sub": {"alpha": "bravo", "a": "b", "c": "d"},
    })
}

/// Expected result of merging [`merge_left`] over [`merge_right`].
#[must_use]
pub fn opposite() -> Value {
    json!({
        "foo": "bar",
        "lorem": "ipsum",
        "mismatch": false,
        "sub": {"alpha": "beta", "a": "b", "c": "d"},
    })
}

/// Document mixing attribute-safe, hidden, shadowed and non-identifier keys.
#[must_use]
pub fn access_document() -> Value {
    json!({
        "foo": "bar",
        "_lorem": "ipsum",
        "\u{1f47b}": "boo",
        "get": "not the function",
        "sub": {"alpha": "bravo"},
        "list": [{"a": "b"}, {"c": "d"}],
    })
}

/// A sequence of mappings, used to observe the sequence policy.
#[must_use]
pub fn sequence_document() -> Value {
    json!({"list": [{"foo": "bar"}]})
}

/// One level of nesting, used by copy and write-through tests.
#[must_use]
pub fn nested_document() -> Value {
    json!({"foo": {"bar": "baz"}})
}
