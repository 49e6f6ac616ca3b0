//! Shared, insertion-ordered raw mapping handle.

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::{Error as _, SerializeSeq},
};

use super::{
    Value,
    guard::{Guard, Walk},
};
use crate::{AttrError, AttrResult, Key};

#[derive(Default)]
struct Table {
    entries: RefCell<IndexMap<Key, Value>>,
    frozen: Cell<bool>,
}

/// Copies already made during one recursive copy, keyed by source table.
///
/// Lets a mapping that contains itself be copied into a mapping that
/// contains itself, instead of recursing forever.
#[derive(Default)]
pub(crate) struct CopyMemo(HashMap<usize, RawMapping>);

/// Handle to an ordered key/value table.
///
/// Cloning the handle aliases the table: changes made through one clone are
/// visible through every other. This is what lets a nested instance obtained
/// by attribute access write straight into its parent's storage, and what
/// gives shallow copies their aliasing behaviour.
///
/// Mutation is only available inside the crate; callers change content
/// through the item and attribute operations of an [`crate::Attr`] instance.
/// A frozen table refuses every mutation with [`AttrError::ReadOnly`] no
/// matter which instance holds the handle. The handle is single-threaded
/// (`Rc`), and borrows are released before every method returns.
#[derive(Clone, Default)]
pub struct RawMapping(Rc<Table>);

impl RawMapping {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Ref<'_, IndexMap<Key, Value>> {
        self.0.entries.borrow()
    }

    fn table_mut(&self, operation: &'static str) -> AttrResult<RefMut<'_, IndexMap<Key, Value>>> {
        if self.is_frozen() {
            Err(AttrError::read_only(operation))
        } else {
            Ok(self.0.entries.borrow_mut())
        }
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Returns `true` when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.table().contains_key(key)
    }

    /// Fetch the raw value stored at `key`.
    ///
    /// Nested mappings are returned as aliasing handles.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.table().get(key).cloned()
    }

    /// Snapshot of the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.table().keys().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.table()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns `true` when both handles point at the same table.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` when the table belongs to a read-only mapping.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.0.frozen.get()
    }

    /// New writable table holding the same entries; nested mappings stay
    /// shared.
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        Self::from(self.table().clone())
    }

    /// New writable table with every nested mapping duplicated as well.
    ///
    /// A table that contains itself, directly or further down, yields a copy
    /// that contains the copy at the same places.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.copy_tree(&mut CopyMemo::default(), false)
    }

    /// Read-only version of this table.
    ///
    /// Tables that are already frozen are shared as they are. Every other
    /// table reachable from here is copied and the copy frozen, so freezing
    /// never changes what an existing writable handle can do.
    pub(crate) fn frozen_copy(&self) -> Self {
        self.copy_tree(&mut CopyMemo::default(), true)
    }

    pub(crate) fn copy_tree(&self, memo: &mut CopyMemo, freeze: bool) -> Self {
        if freeze && self.is_frozen() {
            return self.clone();
        }
        if let Some(done) = memo.0.get(&self.addr()) {
            return done.clone();
        }
        let copy = Self::new();
        memo.0.insert(self.addr(), copy.clone());
        let table: IndexMap<Key, Value> = self
            .entries()
            .into_iter()
            .map(|(key, value)| (key, value.copy_tree(memo, freeze)))
            .collect();
        copy.fill(table);
        copy.0.frozen.set(freeze);
        copy
    }

    /// Set the entries of a table the crate is still building. Handles to
    /// it may already sit inside the entries when the source had a cycle.
    pub(crate) fn fill(&self, table: IndexMap<Key, Value>) {
        *self.0.entries.borrow_mut() = table;
    }

    pub(crate) fn insert(&self, key: Key, value: Value) -> AttrResult<Option<Value>> {
        Ok(self.table_mut("insert")?.insert(key, value))
    }

    pub(crate) fn remove(&self, key: &Key) -> AttrResult<Option<Value>> {
        Ok(self.table_mut("remove")?.shift_remove(key))
    }

    pub(crate) fn pop_last(&self) -> AttrResult<Option<(Key, Value)>> {
        Ok(self.table_mut("pop_item")?.pop())
    }

    pub(crate) fn clear(&self) -> AttrResult<()> {
        self.table_mut("clear")?.clear();
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for RawMapping
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let table: IndexMap<Key, Value> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from(table)
    }
}

impl From<IndexMap<Key, Value>> for RawMapping {
    fn from(table: IndexMap<Key, Value>) -> Self {
        Self(Rc::new(Table {
            entries: RefCell::new(table),
            frozen: Cell::new(false),
        }))
    }
}

/// Structural, order-insensitive equality. Two tables that recurse back into
/// a comparison already in progress are taken as equal at that point.
impl PartialEq for RawMapping {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let Some(_guard) = Guard::enter(Walk::Compare, self.addr(), other.addr()) else {
            return true;
        };
        let left = self.entries();
        let right = other.table();
        left.len() == right.len()
            && left
                .iter()
                .all(|(key, value)| right.get(key).is_some_and(|theirs| theirs == value))
    }
}

impl PartialEq<Value> for RawMapping {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl fmt::Debug for RawMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_guard) = Guard::enter(Walk::Render, self.addr(), 0) else {
            return f.write_str("{...}");
        };
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Renders a table that is already being rendered further up as `{...}`.
impl fmt::Display for RawMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_guard) = Guard::enter(Walk::Render, self.addr(), 0) else {
            return f.write_str("{...}");
        };
        f.write_str("{")?;
        for (index, (key, value)) in self.entries().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Encoded as a sequence of `[key, value]` pairs so non-text keys survive
/// transports such as JSON. A table that contains itself cannot be encoded.
impl Serialize for RawMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(_guard) = Guard::enter(Walk::Encode, self.addr(), 0) else {
            return Err(S::Error::custom("mapping contains itself"));
        };
        let entries = self.entries();
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for entry in &entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(Key, Value)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
