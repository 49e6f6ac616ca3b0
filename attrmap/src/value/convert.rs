//! Conversions from parsed document formats into raw values.
//!
//! Parsing stays with the caller; these impls only reshape an already parsed
//! tree. Arrays become [`Value::List`] and tables become [`Value::Map`].

#[cfg(feature = "serde_json")]
mod json {
    use serde_json::Number;

    use super::super::{RawMapping, Value};
    use crate::{AttrError, AttrResult, Key};

    /// Integers become [`Value::Int`] and fractional numbers [`Value::Float`];
    /// integers outside the `i64` range are refused rather than rounded.
    fn number(number: &Number) -> AttrResult<Value> {
        match (number.as_i64(), number.as_f64()) {
            (Some(int), _) => Ok(Value::Int(int)),
            (None, Some(float)) if number.is_f64() => Ok(Value::Float(float)),
            _ => Err(AttrError::NumberOutOfRange {
                number: number.to_string(),
            }),
        }
    }

    impl TryFrom<serde_json::Value> for Value {
        type Error = AttrError;

        fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
            Ok(match value {
                serde_json::Value::Null => Self::Null,
                serde_json::Value::Bool(flag) => Self::Bool(flag),
                serde_json::Value::Number(found) => number(&found)?,
                serde_json::Value::String(text) => Self::Str(text),
                serde_json::Value::Array(items) => Self::List(
                    items
                        .into_iter()
                        .map(Self::try_from)
                        .collect::<AttrResult<_>>()?,
                ),
                serde_json::Value::Object(map) => Self::Map(
                    map.into_iter()
                        .map(|(key, item)| Self::try_from(item).map(|value| (Key::Str(key), value)))
                        .collect::<AttrResult<Vec<_>>>()?
                        .into_iter()
                        .collect(),
                ),
            })
        }
    }

    impl TryFrom<serde_json::Value> for RawMapping {
        type Error = AttrError;

        fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
            match Value::try_from(value)? {
                Value::Map(raw) => Ok(raw),
                other => Err(AttrError::IncompatibleOperand {
                    operation: "construct",
                    found: other.type_name(),
                }),
            }
        }
    }
}

#[cfg(feature = "toml")]
mod toml_support {
    use super::super::{RawMapping, Value};
    use crate::{AttrError, Key};

    impl From<toml::Value> for Value {
        fn from(value: toml::Value) -> Self {
            match value {
                toml::Value::String(text) => Self::Str(text),
                toml::Value::Integer(number) => Self::Int(number),
                toml::Value::Float(number) => Self::Float(number),
                toml::Value::Boolean(flag) => Self::Bool(flag),
                toml::Value::Datetime(stamp) => Self::Str(stamp.to_string()),
                toml::Value::Array(items) => {
                    Self::List(items.into_iter().map(Self::from).collect())
                }
                toml::Value::Table(table) => Self::Map(
                    table
                        .into_iter()
                        .map(|(key, item)| (Key::Str(key), Self::from(item)))
                        .collect(),
                ),
            }
        }
    }

    impl TryFrom<toml::Value> for RawMapping {
        type Error = AttrError;

        fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
            match Value::from(value) {
                Value::Map(raw) => Ok(raw),
                other => Err(AttrError::IncompatibleOperand {
                    operation: "construct",
                    found: other.type_name(),
                }),
            }
        }
    }

}
