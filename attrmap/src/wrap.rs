//! Read-side projection of raw values.
//!
//! Every value read out of an instance passes through [`wrap`] once:
//! mappings become instances of the reader's own variant carrying its
//! configuration, sequences are rebuilt according to the
//! [`SequencePolicy`], and everything else is returned unchanged. Nothing
//! produced here is written back into raw storage.

use std::fmt;

use crate::{Attr, AttrError, AttrResult, Configuration, RawMapping, SequencePolicy, Value};

/// A value read out of an instance of variant `M`.
#[derive(Clone)]
pub enum Item<M> {
    /// A nested mapping, wrapped as the same variant as its parent.
    Mapping(M),
    /// A sequence rebuilt under [`SequencePolicy::Tuple`].
    Tuple(Vec<Self>),
    /// A sequence rebuilt under [`SequencePolicy::List`].
    List(Vec<Self>),
    /// A scalar, or a sequence left untouched by
    /// [`SequencePolicy::PassThrough`].
    Value(Value),
}

/// Project `value` into an [`Item`] of variant `M`.
///
/// # Errors
///
/// Propagates [`AttrError::NotImplemented`] when `M` cannot construct nested
/// instances.
pub fn wrap<M: Attr>(value: Value, configuration: &Configuration) -> AttrResult<Item<M>> {
    match (value, configuration.sequence_policy()) {
        (Value::Map(raw), _) => M::construct(raw, configuration.clone()).map(Item::Mapping),
        (Value::List(items) | Value::Tuple(items), SequencePolicy::Tuple) => {
            wrap_all(items, configuration).map(Item::Tuple)
        }
        (Value::List(items) | Value::Tuple(items), SequencePolicy::List) => {
            wrap_all(items, configuration).map(Item::List)
        }
        (other, _) => Ok(Item::Value(other)),
    }
}

fn wrap_all<M: Attr>(items: Vec<Value>, configuration: &Configuration) -> AttrResult<Vec<Item<M>>> {
    items
        .into_iter()
        .map(|item| wrap(item, configuration))
        .collect()
}

impl<M: Attr> Item<M> {
    /// Attribute read on a wrapped mapping.
    ///
    /// # Errors
    ///
    /// Returns the mapping's attribute error, or
    /// [`AttrError::MissingAttribute`] when the item is not a mapping.
    pub fn attr(&self, name: &str) -> AttrResult<Self> {
        match self {
            Self::Mapping(mapping) => mapping.get_attr(name),
            _ => Err(AttrError::missing_attribute(name)),
        }
    }

    /// Item read on a wrapped mapping.
    ///
    /// # Errors
    ///
    /// Returns the mapping's item error, or
    /// [`AttrError::IncompatibleOperand`] when the item is not a mapping.
    pub fn item(&self, key: impl Into<crate::Key>) -> AttrResult<Self> {
        match self {
            Self::Mapping(mapping) => mapping.get_item(key),
            other => Err(AttrError::IncompatibleOperand {
                operation: "get_item",
                found: other.type_name(),
            }),
        }
    }

    /// Element `index` of a rebuilt sequence.
    ///
    /// Pass-through sequences are not rebuilt and therefore have no wrapped
    /// elements; use [`Item::as_value`] to reach them.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Tuple(items) | Self::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Borrow the wrapped mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&M> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Take the wrapped mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::IncompatibleOperand`] when the item is not a
    /// mapping.
    pub fn into_mapping(self) -> AttrResult<M> {
        match self {
            Self::Mapping(mapping) => Ok(mapping),
            other => Err(AttrError::IncompatibleOperand {
                operation: "into_mapping",
                found: other.type_name(),
            }),
        }
    }

    /// Borrow an unwrapped value.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for sequences rebuilt as tuples.
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// Returns `true` for sequences rebuilt as lists.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Short name of the projection, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Value(value) => value.type_name(),
        }
    }

    /// Strip the projection, returning the raw value.
    ///
    /// Wrapped mappings yield an aliasing handle to their storage; rebuilt
    /// sequences keep the shape they were rebuilt into.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Mapping(mapping) => Value::Map(mapping.raw().clone()),
            Self::Tuple(items) => Value::Tuple(items.iter().map(Self::to_value).collect()),
            Self::List(items) => Value::List(items.iter().map(Self::to_value).collect()),
            Self::Value(value) => value.clone(),
        }
    }
}

impl<M: Attr> PartialEq for Item<M> {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}

impl<M: Attr> PartialEq<Value> for Item<M> {
    fn eq(&self, other: &Value) -> bool {
        &self.to_value() == other
    }
}

impl<M: Attr> PartialEq<RawMapping> for Item<M> {
    fn eq(&self, other: &RawMapping) -> bool {
        self.as_mapping().is_some_and(|mapping| mapping.raw() == other)
    }
}

impl<M: Attr> PartialEq<&str> for Item<M> {
    fn eq(&self, other: &&str) -> bool {
        self.as_value().is_some_and(|value| value == other)
    }
}

impl<M: Attr> PartialEq<i64> for Item<M> {
    fn eq(&self, other: &i64) -> bool {
        self.as_value().is_some_and(|value| value == other)
    }
}

impl<M: Attr> fmt::Debug for Item<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(mapping) => f.debug_tuple("Mapping").field(mapping.raw()).finish(),
            Self::Tuple(items) => f.debug_tuple("Tuple").field(items).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl<M: Attr> fmt::Display for Item<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
