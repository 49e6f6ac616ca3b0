//! Construction input builder.
//!
//! Sources are applied in order with a flat last-write-wins rule. A key
//! overridden by a later source keeps the position it was first inserted
//! at. This is deliberately not [`crate::merge()`]: nested mappings are
//! replaced, never combined.

use indexmap::IndexMap;

use crate::{Attr, AttrResult, Configuration, Key, RawMapping, Value};

/// Accumulates construction input for a mapping instance.
///
/// # Examples
///
/// ```
/// use attrmap::{AttrMap, Items, RawMapping};
///
/// let existing: RawMapping = [("alpha", "bravo")].into_iter().collect();
/// let mapping: AttrMap = Items::new()
///     .mapping(&existing)
///     .named("foo", "bar")
///     .named("alpha", "beta")
///     .into();
/// let expected: RawMapping = [("alpha", "beta"), ("foo", "bar")].into_iter().collect();
/// assert_eq!(mapping, expected);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Items(IndexMap<Key, Value>);

impl Items {
    /// Start with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every entry of an existing mapping.
    #[must_use]
    pub fn mapping(mut self, raw: &RawMapping) -> Self {
        self.0.extend(raw.entries());
        self
    }

    /// Apply an ordered sequence of key/value pairs.
    #[must_use]
    pub fn pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        self.0
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    /// Apply a single named pair.
    #[must_use]
    pub fn named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(Key::from(name), value.into());
        self
    }

    /// Number of distinct keys collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build an instance of any variant with `configuration`.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    pub fn build<M: Attr>(self, configuration: Configuration) -> AttrResult<M> {
        M::construct(self.into(), configuration)
    }
}

impl From<Items> for RawMapping {
    fn from(items: Items) -> Self {
        Self::from(items.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Items;
    use crate::{Key, RawMapping, Value};

    #[test]
    fn later_sources_override_earlier_ones() {
        let raw: RawMapping = Items::new()
            .pairs([("alpha", "bravo"), ("alpha", "beta")])
            .named("alpha", "bravo")
            .into();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.get(&Key::from("alpha")), Some(Value::from("bravo")));
    }

    #[test]
    fn nested_mappings_are_replaced_not_merged() {
        let first: RawMapping = [("x", 1)].into_iter().collect();
        let second: RawMapping = [("y", 2)].into_iter().collect();
        let raw: RawMapping = Items::new()
            .named("sub", first)
            .named("sub", second.clone())
            .into();
        assert_eq!(raw.get(&Key::from("sub")), Some(Value::Map(second)));
    }

    #[test]
    fn empty_builder_builds_empty_mapping() {
        let items = Items::new();
        assert!(items.is_empty());
        let raw: RawMapping = items.into();
        assert!(raw.is_empty());
    }
}
