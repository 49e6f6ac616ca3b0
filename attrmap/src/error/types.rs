//! Primary error enum for mapping access and mutation.

use std::fmt;

use thiserror::Error;

use crate::{AttributeClass, Key};

/// Errors that can occur while reading, writing or combining mappings.
///
/// Every variant belongs to exactly one [`ErrorKind`], so callers can tell a
/// content problem (a missing key or attribute) from a caller mistake (an
/// operation the mapping does not permit).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttrError {
    /// Item-style access to a key that is not present.
    #[error("key not found: {key}")]
    MissingKey {
        /// Key that was requested.
        key: Key,
    },

    /// Removal of an arbitrary entry from an empty mapping.
    #[error("{operation}: mapping is empty")]
    EmptyMapping {
        /// Operation that needed an entry.
        operation: &'static str,
    },

    /// Attribute-style access to a name with no backing key.
    #[error("no attribute named '{name}'")]
    MissingAttribute {
        /// Attribute name that was requested.
        name: String,
    },

    /// Attribute-style access to a key that exists but cannot be an attribute.
    #[error("'{name}' is not readable as an attribute: name is {reason}")]
    UnreachableAttribute {
        /// Attribute name that was requested.
        name: String,
        /// Why the name is not attribute-accessible.
        reason: AttributeClass,
    },

    /// Mutation attempted on a read-only mapping.
    #[error("{operation}: mapping is read-only")]
    ReadOnly {
        /// Operation that was refused.
        operation: &'static str,
    },

    /// Attribute write or delete refused by the attribute-shape rules.
    #[error("cannot use '{name}' as an attribute: name is {reason}")]
    InvalidAttribute {
        /// Attribute name that was refused.
        name: String,
        /// Classification that caused the refusal.
        reason: AttributeClass,
    },

    /// An operand was not a mapping where one was required.
    #[error("{operation}: expected a mapping, found {found}")]
    IncompatibleOperand {
        /// Operation that received the operand.
        operation: &'static str,
        /// Type name of the offending operand.
        found: &'static str,
    },

    /// A parsed number has no exact integer or float representation.
    #[error("number {number} does not fit a 64-bit signed integer")]
    NumberOutOfRange {
        /// The number as written in the source document.
        number: String,
    },

    /// Keyword export met a key that is not text.
    #[error("keyword names must be text, found key {key}")]
    NonStringKeyword {
        /// The offending key.
        key: Key,
    },

    /// A mapping variant did not implement part of the construction protocol.
    #[error("{operation} is not implemented by this mapping variant")]
    NotImplemented {
        /// Protocol operation that is missing.
        operation: &'static str,
    },

    /// Serialised state named a default factory the registry does not know.
    #[error("unknown default factory '{name}'")]
    UnknownFactory {
        /// Factory name found in the serialised state.
        name: String,
    },
}

/// Coarse classification of an [`AttrError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Item semantics applied and the key was absent.
    MissingKey,
    /// Attribute semantics applied and the name was absent or unreachable.
    MissingAttribute,
    /// The operation is not permitted by mutability, attribute shape, operand
    /// type or an unimplemented protocol.
    NotPermitted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingKey => "missing key",
            Self::MissingAttribute => "missing attribute",
            Self::NotPermitted => "operation not permitted",
        })
    }
}
