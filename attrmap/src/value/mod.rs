//! Raw values stored inside mappings.
//!
//! Values are always stored unwrapped. Attribute-style projections of nested
//! mappings and sequences are produced on read by [`crate::wrap`] and are
//! never persisted back into the raw structure.

mod convert;
mod guard;
mod raw;

use std::fmt;

use serde::{Deserialize, Serialize};

use raw::CopyMemo;
pub use raw::RawMapping;

/// A raw value held by a [`RawMapping`].
///
/// Equality is strict across variants: `Int(1) != Float(1.0)`, a `List`
/// never equals a `Tuple` and `Bytes` never equal `Str`. Mappings compare
/// structurally without regard to key order.
///
/// Cloning a [`Value::Map`] clones the handle, so both copies alias the same
/// table. Use [`Value::deep_copy`] for an independent duplicate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float (IEEE-754 equality).
    Float(f64),
    /// UTF-8 text. Never treated as a sequence.
    Str(String),
    /// Raw bytes. Never treated as a sequence.
    Bytes(Vec<u8>),
    /// Mutable ordered sequence.
    List(Vec<Self>),
    /// Immutable ordered sequence.
    Tuple(Vec<Self>),
    /// Nested mapping.
    Map(RawMapping),
}

impl Value {
    /// Returns `true` when the value is a nested mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for [`Value::List`] and [`Value::Tuple`].
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::List(_) | Self::Tuple(_))
    }

    /// Borrow the nested mapping handle, if any.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&RawMapping> {
        match self {
            Self::Map(raw) => Some(raw),
            _ => None,
        }
    }

    /// Borrow the text of a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the elements of a list or tuple.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
        }
    }

    /// Duplicate the value recursively so that no nested mapping is shared
    /// with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrmap::{RawMapping, Value};
    ///
    /// let inner: RawMapping = [("k", 1)].into_iter().collect();
    /// let original = Value::Map(inner);
    /// let copy = original.deep_copy();
    /// assert_eq!(original, copy);
    /// assert!(!original.as_mapping().zip(copy.as_mapping()).is_some_and(|(a, b)| a.ptr_eq(b)));
    /// ```
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.copy_tree(&mut CopyMemo::default(), false)
    }

    pub(crate) fn copy_tree(&self, memo: &mut CopyMemo, freeze: bool) -> Self {
        match self {
            Self::List(items) => Self::List(copy_items(items, memo, freeze)),
            Self::Tuple(items) => Self::Tuple(copy_items(items, memo, freeze)),
            Self::Map(raw) => Self::Map(raw.copy_tree(memo, freeze)),
            scalar => scalar.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<RawMapping> for Value {
    fn eq(&self, other: &RawMapping) -> bool {
        self.as_mapping().is_some_and(|raw| raw == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Int(number) if number == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Self::Bool(flag) if flag == other)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<RawMapping> for Value {
    fn from(value: RawMapping) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number:?}"),
            Self::Str(text) => write!(f, "{text:?}"),
            Self::Bytes(bytes) => write!(f, "b{:?}", String::from_utf8_lossy(bytes)),
            Self::List(items) => write_sequence(f, items, ("[", "]"), false),
            Self::Tuple(items) => write_sequence(f, items, ("(", ")"), true),
            Self::Map(raw) => write!(f, "{raw}"),
        }
    }
}

fn copy_items(items: &[Value], memo: &mut CopyMemo, freeze: bool) -> Vec<Value> {
    items
        .iter()
        .map(|item| item.copy_tree(memo, freeze))
        .collect()
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    items: &[Value],
    (open, close): (&str, &str),
    trailing_single: bool,
) -> fmt::Result {
    f.write_str(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    if trailing_single && items.len() == 1 {
        f.write_str(",")?;
    }
    f.write_str(close)
}
