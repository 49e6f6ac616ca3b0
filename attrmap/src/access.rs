//! The attribute/item access core shared by every mapping variant.
//!
//! A variant supplies raw storage, its [`Configuration`] and a way to
//! construct a fresh instance of itself; [`Attr`] provides everything else
//! as default methods. Item access has no restrictions on key shape.
//! Attribute access only reaches keys classified as
//! [`AttributeClass::Attribute`].

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::{
    AttrError, AttrResult, AttributeClass, Configuration, InstanceAttributes, Key, RawMapping,
    ReservedNames, State, Value,
    classify::{CORE_METHODS, classify_key, classify_name},
    merge::merge,
    wrap::{Item, wrap},
};

static CORE_RESERVED: LazyLock<ReservedNames> =
    LazyLock::new(|| ReservedNames::from_groups(&[CORE_METHODS]));

/// Capability interface implemented by every mapping variant.
///
/// Implementors provide [`Attr::raw`], [`Attr::configuration`] and
/// [`Attr::construct`]; all access, mutation, merge, copy and state
/// operations are provided in terms of those three.
///
/// # Examples
///
/// ```
/// use attrmap::{Attr, AttrMap, ErrorKind};
///
/// let mapping: AttrMap = [("foo", "bar"), ("_hidden", "x"), ("get", "y")]
///     .into_iter()
///     .collect();
/// assert_eq!(mapping.get_attr("foo")?, "bar");
/// assert_eq!(mapping.get_item("_hidden")?, "x");
/// assert_eq!(
///     mapping.get_attr("_hidden").map_err(|e| e.kind()).err(),
///     Some(ErrorKind::MissingAttribute)
/// );
/// assert_eq!(mapping.get_item("get")?, "y");
/// # Ok::<_, attrmap::AttrError>(())
/// ```
pub trait Attr: Sized {
    /// Whether the variant permits writes and deletes.
    const MUTABLE: bool;

    /// The wrapped raw mapping.
    fn raw(&self) -> &RawMapping;

    /// Configuration propagated to derived instances.
    fn configuration(&self) -> &Configuration;

    /// Build an instance of this variant around `raw`.
    ///
    /// The core never supplies a working default: variants that do not
    /// override this fail the first time a nested or derived instance is
    /// needed.
    ///
    /// # Errors
    ///
    /// The default implementation always returns
    /// [`AttrError::NotImplemented`].
    fn construct(raw: RawMapping, configuration: Configuration) -> AttrResult<Self> {
        tracing::warn!(
            entries = raw.len(),
            policy = %configuration.sequence_policy(),
            "mapping variant does not implement construct"
        );
        Err(AttrError::not_implemented("construct"))
    }

    /// Method names that attributes of this variant may not shadow.
    fn reserved_names() -> &'static ReservedNames {
        &CORE_RESERVED
    }

    /// Instance attributes kept beside the mapping, if the variant has any.
    fn instance_attributes(&self) -> Option<&InstanceAttributes> {
        None
    }

    /// Mutable access to the instance attributes, if the variant has any.
    fn instance_attributes_mut(&mut self) -> Option<&mut InstanceAttributes> {
        None
    }

    /// Value to use for a key that is absent, or `None` to report it missing.
    ///
    /// Implementations may store the value before returning it.
    fn missing(&self, _key: &Key) -> Option<Value> {
        None
    }

    /// Classify `key` against this variant's reserved names.
    fn classify(&self, key: &Key) -> AttributeClass {
        classify_key(key, Self::reserved_names())
    }

    /// Project a raw value with this instance's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::NotImplemented`] when a nested mapping cannot be
    /// constructed.
    fn wrap(&self, value: Value) -> AttrResult<Item<Self>> {
        wrap(value, self.configuration())
    }

    /// Item read: the value at `key`, recursively wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::MissingKey`] when `key` is absent and
    /// [`Attr::missing`] supplies nothing.
    fn get_item(&self, key: impl Into<Key>) -> AttrResult<Item<Self>> {
        let key = key.into();
        match self.raw().get(&key).or_else(|| self.missing(&key)) {
            Some(value) => self.wrap(value),
            None => Err(AttrError::MissingKey { key }),
        }
    }

    /// Call-style read; identical to [`Attr::get_item`].
    ///
    /// # Errors
    ///
    /// See [`Attr::get_item`].
    fn call(&self, key: impl Into<Key>) -> AttrResult<Item<Self>> {
        self.get_item(key)
    }

    /// Attribute read by `name`.
    ///
    /// Instance attributes are consulted first. Otherwise `name` must be a
    /// present (or synthesisable) key classified as an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::MissingAttribute`] for absent names and
    /// [`AttrError::UnreachableAttribute`] for hidden, shadowed or invalid
    /// names; never [`AttrError::MissingKey`].
    fn get_attr(&self, name: &str) -> AttrResult<Item<Self>> {
        if let Some(value) = self.instance_attributes().and_then(|attrs| attrs.get(name)) {
            return self.wrap(value.clone());
        }
        let key = Key::from(name);
        match self.classify(&key) {
            AttributeClass::Attribute => match self.raw().get(&key).or_else(|| self.missing(&key)) {
                Some(value) => self.wrap(value),
                None => Err(AttrError::missing_attribute(name)),
            },
            reason => Err(AttrError::UnreachableAttribute {
                name: name.to_owned(),
                reason,
            }),
        }
    }

    /// Convenience read that never reports a missing key.
    ///
    /// Does not invoke [`Attr::missing`].
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::NotImplemented`] when a nested mapping cannot be
    /// constructed.
    fn get(&self, key: impl Into<Key>) -> AttrResult<Option<Item<Self>>> {
        self.raw()
            .get(&key.into())
            .map(|value| self.wrap(value))
            .transpose()
    }

    /// Like [`Attr::get`] but returns `default`, unwrapped, for absent keys.
    ///
    /// # Errors
    ///
    /// See [`Attr::get`].
    fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> AttrResult<Item<Self>> {
        Ok(self
            .get(key)?
            .unwrap_or_else(|| Item::Value(default.into())))
    }

    /// Returns `true` when `key` is present. Never wraps or synthesises.
    fn contains(&self, key: impl Into<Key>) -> bool {
        self.raw().contains_key(&key.into())
    }

    /// Number of entries.
    fn len(&self) -> usize {
        self.raw().len()
    }

    /// Returns `true` when there are no entries.
    fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }

    /// Snapshot of the keys in storage order.
    fn keys(&self) -> Vec<Key> {
        self.raw().keys()
    }

    /// Snapshot of the values, each wrapped.
    ///
    /// # Errors
    ///
    /// See [`Attr::wrap`].
    fn values(&self) -> AttrResult<Vec<Item<Self>>> {
        self.raw()
            .entries()
            .into_iter()
            .map(|(_, value)| self.wrap(value))
            .collect()
    }

    /// Snapshot of the entries, values wrapped.
    ///
    /// # Errors
    ///
    /// See [`Attr::wrap`].
    fn items(&self) -> AttrResult<Vec<(Key, Item<Self>)>> {
        self.raw()
            .entries()
            .into_iter()
            .map(|(key, value)| self.wrap(value).map(|item| (key, item)))
            .collect()
    }

    /// Attribute write.
    ///
    /// Attribute-class names are written to the mapping exactly as
    /// [`Attr::set_item`] would. Hidden and non-identifier names go to the
    /// instance attributes when the variant allows invalid attributes.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants and
    /// [`AttrError::InvalidAttribute`] for shadowed names or refused
    /// hidden/invalid names.
    fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> AttrResult<()> {
        ensure_mutable::<Self>("set_attr")?;
        match classify_name(name, Self::reserved_names()) {
            AttributeClass::Attribute => {
                self.raw().insert(Key::from(name), value.into())?;
                Ok(())
            }
            AttributeClass::Shadowed => Err(invalid_attribute(name, AttributeClass::Shadowed)),
            reason => match self.instance_attributes_mut() {
                Some(attrs) if attrs.allows_invalid() => {
                    attrs.insert(name, value.into());
                    Ok(())
                }
                _ => Err(invalid_attribute(name, reason)),
            },
        }
    }

    /// Item write. Any key shape is accepted; the value is stored unwrapped.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants.
    fn set_item(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> AttrResult<()> {
        ensure_mutable::<Self>("set_item")?;
        self.raw().insert(key.into(), value.into())?;
        Ok(())
    }

    /// Attribute delete.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants,
    /// [`AttrError::InvalidAttribute`] for shadowed names or refused
    /// hidden/invalid names, and [`AttrError::MissingAttribute`] when the
    /// name is simply absent.
    fn del_attr(&mut self, name: &str) -> AttrResult<()> {
        ensure_mutable::<Self>("del_attr")?;
        match classify_name(name, Self::reserved_names()) {
            AttributeClass::Attribute => self
                .raw()
                .remove(&Key::from(name))?
                .map(drop)
                .ok_or_else(|| AttrError::missing_attribute(name)),
            AttributeClass::Shadowed => Err(invalid_attribute(name, AttributeClass::Shadowed)),
            reason => match self.instance_attributes_mut() {
                Some(attrs) if attrs.allows_invalid() => attrs
                    .remove(name)
                    .map(drop)
                    .ok_or_else(|| AttrError::missing_attribute(name)),
                _ => Err(invalid_attribute(name, reason)),
            },
        }
    }

    /// Attribute delete without classification checks.
    ///
    /// Removes the instance attribute `name` if set, otherwise the mapping
    /// key `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants and
    /// [`AttrError::MissingAttribute`] when neither exists.
    fn force_del_attr(&mut self, name: &str) -> AttrResult<()> {
        ensure_mutable::<Self>("force_del_attr")?;
        if self
            .instance_attributes_mut()
            .and_then(|attrs| attrs.remove(name))
            .is_some()
        {
            return Ok(());
        }
        self.raw()
            .remove(&Key::from(name))?
            .map(drop)
            .ok_or_else(|| AttrError::missing_attribute(name))
    }

    /// Item delete.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants and
    /// [`AttrError::MissingKey`] when `key` is absent.
    fn del_item(&mut self, key: impl Into<Key>) -> AttrResult<()> {
        ensure_mutable::<Self>("del_item")?;
        let key = key.into();
        match self.raw().remove(&key)? {
            Some(_) => Ok(()),
            None => Err(AttrError::MissingKey { key }),
        }
    }

    /// Merge `other` over this instance into a new instance carrying this
    /// instance's configuration. See [`crate::merge()`].
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn merge(&self, other: &RawMapping) -> AttrResult<Self> {
        Self::construct(merge(self.raw(), other), self.configuration().clone())
    }

    /// Merge this instance over a plain `base` mapping. The result still
    /// carries this instance's configuration.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn merge_onto(&self, base: &RawMapping) -> AttrResult<Self> {
        Self::construct(merge(base, self.raw()), self.configuration().clone())
    }

    /// Shallow copy: a new top-level table whose nested mappings are shared.
    /// Instance attributes and the escape flag are copied too.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn copy(&self) -> AttrResult<Self> {
        let copy = Self::construct(self.raw().shallow_copy(), self.configuration().clone())?;
        Ok(carry_attributes(self, copy, InstanceAttributes::clone))
    }

    /// Deep copy: nothing is shared with `self` at any depth, including
    /// instance attribute values.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn deep_copy(&self) -> AttrResult<Self> {
        let copy = Self::construct(self.raw().deep_copy(), self.configuration().clone())?;
        Ok(carry_attributes(self, copy, InstanceAttributes::deep_copy))
    }

    /// Capture content, configuration and the escape flag as an opaque
    /// [`State`].
    fn to_state(&self) -> State {
        State::new(self.raw().deep_copy(), self.configuration().clone())
            .with_allow_invalid_attributes(
                self.instance_attributes()
                    .is_some_and(InstanceAttributes::allows_invalid),
            )
    }

    /// Rebuild an instance of this variant from `state`.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn from_state(state: State) -> AttrResult<Self> {
        let allow_invalid = state.allows_invalid_attributes();
        let (mapping, configuration) = state.into_parts();
        tracing::debug!(
            entries = mapping.len(),
            policy = %configuration.sequence_policy(),
            allow_invalid,
            "rebuilding mapping from state"
        );
        let mut rebuilt = Self::construct(mapping, configuration)?;
        if let Some(attrs) = rebuilt.instance_attributes_mut() {
            attrs.set_allow_invalid(allow_invalid);
        }
        Ok(rebuilt)
    }

    /// Build an instance mapping every key in `keys` to `value`.
    ///
    /// # Errors
    ///
    /// See [`Attr::construct`].
    fn from_keys<I, K>(keys: I, value: impl Into<Value>) -> AttrResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let value = value.into();
        let raw = keys
            .into_iter()
            .map(|key| (Into::<Key>::into(key), value.clone()))
            .collect();
        Self::construct(raw, Configuration::new())
    }

    /// Export the raw entries as keyword-style name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::NonStringKeyword`] when a key is not text.
    fn to_kwargs(&self) -> AttrResult<IndexMap<String, Value>> {
        self.raw()
            .entries()
            .into_iter()
            .map(|(key, value)| match key {
                Key::Str(name) => Ok((name, value)),
                other => Err(AttrError::NonStringKeyword { key: other }),
            })
            .collect()
    }
}

/// Extra operations offered by mutable variants.
///
/// Each goes through the same mutability check as [`Attr::set_item`].
pub trait MutableAttr: Attr {
    /// Remove `key` and return its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::MissingKey`] when `key` is absent.
    fn pop(&mut self, key: impl Into<Key>) -> AttrResult<Value> {
        ensure_mutable::<Self>("pop")?;
        let key = key.into();
        self.raw()
            .remove(&key)?
            .ok_or(AttrError::MissingKey { key })
    }

    /// Remove `key` and return its raw value, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants.
    fn pop_or(&mut self, key: impl Into<Key>, default: impl Into<Value>) -> AttrResult<Value> {
        ensure_mutable::<Self>("pop")?;
        Ok(self
            .raw()
            .remove(&key.into())?
            .unwrap_or_else(|| default.into()))
    }

    /// Remove and return the most recently inserted entry.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::EmptyMapping`] when there is nothing to remove.
    fn pop_item(&mut self) -> AttrResult<(Key, Value)> {
        ensure_mutable::<Self>("pop_item")?;
        self.raw()
            .pop_last()?
            .ok_or(AttrError::EmptyMapping {
                operation: "pop_item",
            })
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants.
    fn clear(&mut self) -> AttrResult<()> {
        ensure_mutable::<Self>("clear")?;
        self.raw().clear()
    }

    /// Write every pair with item semantics, in order.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants.
    fn update<I, K, V>(&mut self, pairs: I) -> AttrResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        ensure_mutable::<Self>("update")?;
        for (key, value) in pairs {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Return the value at `key`, inserting `default` first when absent.
    ///
    /// Insertion uses item semantics: a hidden or shadowed key is stored but
    /// stays unreachable as an attribute. The default factory is not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadOnly`] for immutable variants.
    fn set_default(
        &mut self,
        key: impl Into<Key>,
        default: impl Into<Value>,
    ) -> AttrResult<Item<Self>> {
        ensure_mutable::<Self>("set_default")?;
        let key = key.into();
        if let Some(existing) = self.raw().get(&key) {
            return self.wrap(existing);
        }
        let value = default.into();
        self.raw().insert(key, value.clone())?;
        self.wrap(value)
    }

    /// Whether hidden or non-identifier attribute names may be written.
    fn allows_invalid_attributes(&self) -> bool {
        self.instance_attributes()
            .is_some_and(InstanceAttributes::allows_invalid)
    }

    /// Toggle the invalid-attribute escape.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::NotImplemented`] when the variant keeps no
    /// instance attributes.
    fn set_allow_invalid_attributes(&mut self, allow: bool) -> AttrResult<()> {
        let attrs = self
            .instance_attributes_mut()
            .ok_or(AttrError::not_implemented("instance attributes"))?;
        attrs.set_allow_invalid(allow);
        Ok(())
    }
}

fn carry_attributes<M: Attr>(
    source: &M,
    mut target: M,
    duplicate: impl Fn(&InstanceAttributes) -> InstanceAttributes,
) -> M {
    if let (Some(attrs), Some(slot)) = (source.instance_attributes(), target.instance_attributes_mut())
    {
        *slot = duplicate(attrs);
    }
    target
}

fn ensure_mutable<M: Attr>(operation: &'static str) -> AttrResult<()> {
    if M::MUTABLE {
        Ok(())
    } else {
        Err(AttrError::read_only(operation))
    }
}

fn invalid_attribute(name: &str, reason: AttributeClass) -> AttrError {
    AttrError::InvalidAttribute {
        name: name.to_owned(),
        reason,
    }
}
