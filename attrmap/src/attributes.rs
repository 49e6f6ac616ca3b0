//! Instance attributes kept beside the mapping.
//!
//! When invalid attributes are allowed, names that can never be mapping
//! attributes (hidden or non-identifier names) are stored here instead of
//! in the raw mapping, so mapping content and equality are unaffected.

use indexmap::IndexMap;

use crate::Value;

/// Side table of instance attributes plus the escape flag that enables it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceAttributes {
    allow_invalid: bool,
    values: IndexMap<String, Value>,
}

impl InstanceAttributes {
    /// Whether hidden or non-identifier names may be written.
    #[must_use]
    pub const fn allows_invalid(&self) -> bool {
        self.allow_invalid
    }

    /// Toggle the escape flag. Existing entries are kept either way.
    pub const fn set_allow_invalid(&mut self, allow: bool) {
        self.allow_invalid = allow;
    }

    /// Fetch an instance attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` when `name` is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of instance attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no instance attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    /// Same flag, with every stored value duplicated recursively.
    pub(crate) fn deep_copy(&self) -> Self {
        Self {
            allow_invalid: self.allow_invalid,
            values: self
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.deep_copy()))
                .collect(),
        }
    }
}
