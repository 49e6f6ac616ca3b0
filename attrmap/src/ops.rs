//! Operator and conversion impls shared by the concrete variants.
//!
//! Equality compares raw content only, so instances of different variants,
//! plain [`RawMapping`]s and [`Value::Map`]s all compare structurally. The
//! `+` operator merges with [`crate::merge()`] and always yields the
//! variant and configuration of whichever operand is a mapping instance,
//! preferring the left one.

use std::ops::Add;

use crate::{
    Attr, AttrDefault, AttrError, AttrMap, AttrResult, FrozenAttrMap, Items, RawMapping, Value,
    wrap::Item,
};

fn merge_value<M: Attr>(mapping: &M, operand: &Value, onto: bool) -> AttrResult<M> {
    match operand {
        Value::Map(raw) if onto => mapping.merge_onto(raw),
        Value::Map(raw) => mapping.merge(raw),
        other => Err(AttrError::IncompatibleOperand {
            operation: "merge",
            found: other.type_name(),
        }),
    }
}

macro_rules! mapping_ops {
    ($($variant:ty),+ $(,)?) => {$(
        impl PartialEq<RawMapping> for $variant {
            fn eq(&self, other: &RawMapping) -> bool {
                self.raw() == other
            }
        }

        impl PartialEq<$variant> for RawMapping {
            fn eq(&self, other: &$variant) -> bool {
                self == other.raw()
            }
        }

        impl PartialEq<Value> for $variant {
            fn eq(&self, other: &Value) -> bool {
                self.raw() == other
            }
        }

        impl PartialEq<$variant> for Value {
            fn eq(&self, other: &$variant) -> bool {
                self == other.raw()
            }
        }

        impl From<$variant> for Value {
            fn from(mapping: $variant) -> Self {
                Self::Map(mapping.raw().clone())
            }
        }

        impl From<Items> for $variant {
            fn from(items: Items) -> Self {
                Self::from(RawMapping::from(items))
            }
        }

        impl Add<&RawMapping> for &$variant {
            type Output = AttrResult<$variant>;

            fn add(self, rhs: &RawMapping) -> Self::Output {
                self.merge(rhs)
            }
        }

        impl Add<&$variant> for &RawMapping {
            type Output = AttrResult<$variant>;

            fn add(self, rhs: &$variant) -> Self::Output {
                rhs.merge_onto(self)
            }
        }

        impl Add<&Value> for &$variant {
            type Output = AttrResult<$variant>;

            fn add(self, rhs: &Value) -> Self::Output {
                merge_value(self, rhs, false)
            }
        }

        impl Add<&$variant> for &Value {
            type Output = AttrResult<$variant>;

            fn add(self, rhs: &$variant) -> Self::Output {
                merge_value(rhs, self, true)
            }
        }

        #[cfg(feature = "serde_json")]
        impl TryFrom<serde_json::Value> for $variant {
            type Error = AttrError;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                RawMapping::try_from(value).map(Self::from)
            }
        }
    )+};
}

macro_rules! cross_ops {
    ($left:ty => $($right:ty),+ $(,)?) => {$(
        impl PartialEq<$right> for $left {
            fn eq(&self, other: &$right) -> bool {
                self.raw() == other.raw()
            }
        }

        impl Add<&$right> for &$left {
            type Output = AttrResult<$left>;

            fn add(self, rhs: &$right) -> Self::Output {
                self.merge(rhs.raw())
            }
        }
    )+};
}

mapping_ops!(AttrMap, FrozenAttrMap, AttrDefault);
cross_ops!(AttrMap => AttrMap, FrozenAttrMap, AttrDefault);
cross_ops!(FrozenAttrMap => AttrMap, FrozenAttrMap, AttrDefault);
cross_ops!(AttrDefault => AttrMap, FrozenAttrMap, AttrDefault);

impl<M: Attr> From<Item<M>> for Value {
    fn from(item: Item<M>) -> Self {
        item.to_value()
    }
}
