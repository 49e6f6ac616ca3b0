//! Constructors and classification helpers for `AttrError`.

use super::{AttrError, ErrorKind};
use crate::Key;

impl AttrError {
    /// Classify the error into one of the three [`ErrorKind`]s.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrmap::{AttrError, ErrorKind};
    ///
    /// let err = AttrError::read_only("set_item");
    /// assert_eq!(err.kind(), ErrorKind::NotPermitted);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingKey { .. } | Self::EmptyMapping { .. } => ErrorKind::MissingKey,
            Self::MissingAttribute { .. } | Self::UnreachableAttribute { .. } => {
                ErrorKind::MissingAttribute
            }
            Self::ReadOnly { .. }
            | Self::InvalidAttribute { .. }
            | Self::IncompatibleOperand { .. }
            | Self::NumberOutOfRange { .. }
            | Self::NonStringKeyword { .. }
            | Self::NotImplemented { .. }
            | Self::UnknownFactory { .. } => ErrorKind::NotPermitted,
        }
    }

    /// Build a [`AttrError::MissingKey`] for `key`.
    #[must_use]
    pub fn missing_key(key: impl Into<Key>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Build a [`AttrError::MissingAttribute`] for `name`.
    #[must_use]
    pub fn missing_attribute(name: &str) -> Self {
        Self::MissingAttribute {
            name: name.to_owned(),
        }
    }

    /// Build a [`AttrError::ReadOnly`] naming the refused operation.
    #[must_use]
    pub const fn read_only(operation: &'static str) -> Self {
        Self::ReadOnly { operation }
    }

    /// Build a [`AttrError::NotImplemented`] naming the missing operation.
    #[must_use]
    pub const fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }
}
