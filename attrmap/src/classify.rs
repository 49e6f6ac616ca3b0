//! Attribute-name classification.
//!
//! A key is readable as an attribute only when it is text, is an ASCII
//! identifier (`[A-Za-z][A-Za-z0-9_]*`) and does not collide with a name in
//! the variant's reserved method surface. Classification runs on every
//! access and is never cached.

use std::{collections::BTreeSet, fmt};

use crate::Key;

/// Outcome of classifying a key for attribute access.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttributeClass {
    /// Usable as an attribute.
    Attribute,
    /// Text beginning with an underscore.
    Hidden,
    /// Collides with a reserved method name of the variant.
    Shadowed,
    /// Not text, or text that is not an identifier.
    Invalid,
}

impl fmt::Display for AttributeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attribute => "accessible",
            Self::Hidden => "hidden",
            Self::Shadowed => "shadowed by a method",
            Self::Invalid => "not an identifier",
        })
    }
}

/// Names bound by every mapping variant.
pub const CORE_METHODS: &[&str] = &[
    "call",
    "classify",
    "configuration",
    "construct",
    "contains",
    "copy",
    "deep_copy",
    "del_attr",
    "del_item",
    "force_del_attr",
    "from_keys",
    "from_state",
    "get",
    "get_attr",
    "get_item",
    "get_or",
    "instance_attributes",
    "instance_attributes_mut",
    "is_empty",
    "items",
    "keys",
    "len",
    "merge",
    "merge_onto",
    "missing",
    "raw",
    "reserved_names",
    "set_attr",
    "set_item",
    "to_kwargs",
    "to_state",
    "values",
    "wrap",
];

/// Names added by mutable variants.
pub const MUTABLE_METHODS: &[&str] = &[
    "allows_invalid_attributes",
    "clear",
    "pop",
    "pop_item",
    "pop_or",
    "set_allow_invalid_attributes",
    "set_default",
    "update",
];

/// Trait methods bound on every concrete variant through `Add`, `Clone`,
/// `Default`, `Display`, `Debug`, `PartialEq`, `From`, `TryFrom` and
/// `FromIterator`, plus the blanket `ToString`, `ToOwned`, `Into` and
/// `TryInto` they bring along.
pub const TRAIT_METHODS: &[&str] = &[
    "add",
    "clone",
    "clone_from",
    "default",
    "eq",
    "fmt",
    "from",
    "from_iter",
    "into",
    "ne",
    "to_owned",
    "to_string",
    "try_from",
    "try_into",
];

/// Inherent methods of [`crate::FrozenAttrMap`].
pub const FROZEN_METHODS: &[&str] = &["from_raw", "with_sequence_policy"];

/// Inherent methods of [`crate::AttrMap`].
pub const MAPPING_METHODS: &[&str] = &["from_raw", "new", "with_sequence_policy"];

/// Inherent methods of [`crate::AttrDefault`].
pub const DEFAULT_METHODS: &[&str] = &[
    "default_factory",
    "from_raw",
    "new",
    "pass_key",
    "with_pass_key",
    "with_raw",
    "with_sequence_policy",
];

/// Enumerable set of method names an attribute may not shadow.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReservedNames(BTreeSet<&'static str>);

impl ReservedNames {
    /// Union the supplied groups of names.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrmap::{ReservedNames, classify::{CORE_METHODS, MUTABLE_METHODS}};
    ///
    /// let names = ReservedNames::from_groups(&[CORE_METHODS, MUTABLE_METHODS]);
    /// assert!(names.contains("get"));
    /// assert!(names.contains("pop"));
    /// assert!(!names.contains("foo"));
    /// ```
    #[must_use]
    pub fn from_groups(groups: &[&[&'static str]]) -> Self {
        Self(groups.iter().flat_map(|group| group.iter().copied()).collect())
    }

    /// Returns `true` when `name` is reserved.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterate the reserved names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

/// Returns `true` when `name` matches `[A-Za-z][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Classify a text name against `reserved`.
#[must_use]
pub fn classify_name(name: &str, reserved: &ReservedNames) -> AttributeClass {
    if name.starts_with('_') {
        AttributeClass::Hidden
    } else if !is_identifier(name) {
        AttributeClass::Invalid
    } else if reserved.contains(name) {
        AttributeClass::Shadowed
    } else {
        AttributeClass::Attribute
    }
}

/// Classify any key against `reserved`. Non-text keys are always invalid.
#[must_use]
pub fn classify_key(key: &Key, reserved: &ReservedNames) -> AttributeClass {
    key.as_str()
        .map_or(AttributeClass::Invalid, |name| classify_name(name, reserved))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        AttributeClass, CORE_METHODS, Key, MUTABLE_METHODS, ReservedNames, classify_key,
        classify_name,
    };

    fn reserved() -> ReservedNames {
        ReservedNames::from_groups(&[CORE_METHODS, MUTABLE_METHODS])
    }

    #[rstest]
    #[case("foo", AttributeClass::Attribute)]
    #[case("foo_bar2", AttributeClass::Attribute)]
    #[case("_lorem", AttributeClass::Hidden)]
    #[case("__dunder__", AttributeClass::Hidden)]
    #[case("get", AttributeClass::Shadowed)]
    #[case("pop", AttributeClass::Shadowed)]
    #[case("2fast", AttributeClass::Invalid)]
    #[case("with space", AttributeClass::Invalid)]
    #[case("\u{1f47b}", AttributeClass::Invalid)]
    #[case("", AttributeClass::Invalid)]
    fn classifies_names(#[case] name: &str, #[case] expected: AttributeClass) {
        assert_eq!(classify_name(name, &reserved()), expected);
    }

    #[rstest]
    #[case(Key::Int(3))]
    #[case(Key::Bool(true))]
    #[case(Key::Bytes(b"bytes".to_vec()))]
    fn non_text_keys_are_invalid(#[case] key: Key) {
        assert_eq!(classify_key(&key, &reserved()), AttributeClass::Invalid);
    }

    #[test]
    fn reserved_set_depends_on_groups() {
        let core_only = ReservedNames::from_groups(&[CORE_METHODS]);
        assert_eq!(classify_name("pop", &core_only), AttributeClass::Attribute);
        assert_eq!(classify_name("pop", &reserved()), AttributeClass::Shadowed);
    }
}
