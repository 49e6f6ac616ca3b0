//! Ordered mappings readable through attribute-style names as well as keys.
//!
//! The crate defines the [`Attr`] capability trait, which supplies item and
//! attribute access, structural merging, copying and state capture on top
//! of a shared [`RawMapping`]. Three variants implement it: the read-only
//! [`FrozenAttrMap`], the mutable [`AttrMap`] and the default-filling
//! [`AttrDefault`].
//!
//! Reads recursively wrap nested mappings as the reader's own variant and
//! rebuild sequences according to the instance's [`SequencePolicy`]:
//!
//! ```
//! use attrmap::{Attr, AttrMap, RawMapping, Value, merge};
//!
//! let left: RawMapping = [("name", Value::from("svc")), ("port", Value::Int(80))]
//!     .into_iter()
//!     .collect();
//! let right: RawMapping = [("port", 8080)].into_iter().collect();
//!
//! let config = AttrMap::from(merge(&left, &right));
//! assert_eq!(config.get_attr("port")?, 8080);
//! assert_eq!(config.get_item("name")?, "svc");
//! # Ok::<_, attrmap::AttrError>(())
//! ```
//!
//! Attribute access only reaches keys that are plain identifiers, do not
//! start with an underscore and do not collide with a method name:
//!
//! ```
//! use attrmap::classify::{CORE_METHODS, MUTABLE_METHODS};
//!
//! assert!(CORE_METHODS.contains(&"get"));
//! assert!(MUTABLE_METHODS.contains(&"pop"));
//! ```

mod access;
mod attributes;
pub mod classify;
mod config;
mod default;
mod error;
mod frozen;
mod items;
mod key;
mod mapping;
mod merge;
mod ops;
mod state;
mod value;
mod wrap;

pub use access::{Attr, MutableAttr};
pub use attributes::InstanceAttributes;
pub use classify::{AttributeClass, ReservedNames};
pub use config::{
    Configuration, DefaultFactory, FactoryRegistry, ParsePolicyError, SequencePolicy,
    SerializedConfiguration,
};
pub use default::{AttrDefault, synthesize};
pub use error::{AttrError, AttrResult, ErrorKind};
pub use frozen::FrozenAttrMap;
pub use items::Items;
pub use key::Key;
pub use mapping::AttrMap;
pub use merge::merge;
pub use state::{SerializedState, State};
pub use value::{RawMapping, Value};
pub use wrap::{Item, wrap};
