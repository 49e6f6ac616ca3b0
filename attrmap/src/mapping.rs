//! The mutable mapping variant.

use std::{fmt, sync::LazyLock};

use crate::{
    Attr, AttrResult, Configuration, InstanceAttributes, Key, MutableAttr, RawMapping,
    ReservedNames, SequencePolicy, Value,
    classify::{CORE_METHODS, MAPPING_METHODS, MUTABLE_METHODS, TRAIT_METHODS},
};

static RESERVED: LazyLock<ReservedNames> = LazyLock::new(|| {
    ReservedNames::from_groups(&[CORE_METHODS, MUTABLE_METHODS, TRAIT_METHODS, MAPPING_METHODS])
});

/// Mutable ordered mapping with attribute-style access.
///
/// `Clone` produces a second handle to the same storage; use
/// [`Attr::copy`] or [`Attr::deep_copy`] for independent tables.
///
/// # Examples
///
/// ```
/// use attrmap::{Attr, AttrMap, RawMapping, Value};
///
/// let sub: RawMapping = [("bar", "baz")].into_iter().collect();
/// let mut mapping = AttrMap::from_iter([("foo", Value::Map(sub))]);
///
/// let mut foo = mapping.get_attr("foo")?.into_mapping()?;
/// foo.set_attr("bar", "qux")?;
/// mapping.set_attr("alpha", "bravo")?;
///
/// assert_eq!(mapping.get_attr("foo")?.attr("bar")?, "qux");
/// assert_eq!(mapping.len(), 2);
/// # Ok::<_, attrmap::AttrError>(())
/// ```
#[derive(Clone, Default)]
pub struct AttrMap {
    raw: RawMapping,
    configuration: Configuration,
    attributes: InstanceAttributes,
}

impl AttrMap {
    /// Empty mapping with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `raw` with `configuration`.
    #[must_use]
    pub fn from_raw(raw: RawMapping, configuration: Configuration) -> Self {
        Self {
            raw,
            configuration,
            attributes: InstanceAttributes::default(),
        }
    }

    /// Replace the sequence policy used for reads.
    #[must_use]
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.configuration = self.configuration.with_sequence_policy(policy);
        self
    }
}

impl Attr for AttrMap {
    const MUTABLE: bool = true;

    fn raw(&self) -> &RawMapping {
        &self.raw
    }

    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn construct(raw: RawMapping, configuration: Configuration) -> AttrResult<Self> {
        Ok(Self::from_raw(raw, configuration))
    }

    fn reserved_names() -> &'static ReservedNames {
        &RESERVED
    }

    fn instance_attributes(&self) -> Option<&InstanceAttributes> {
        Some(&self.attributes)
    }

    fn instance_attributes_mut(&mut self) -> Option<&mut InstanceAttributes> {
        Some(&mut self.attributes)
    }
}

impl MutableAttr for AttrMap {}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_raw(iter.into_iter().collect(), Configuration::new())
    }
}

impl From<RawMapping> for AttrMap {
    fn from(raw: RawMapping) -> Self {
        Self::from_raw(raw, Configuration::new())
    }
}

impl fmt::Debug for AttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrMap")
            .field("raw", &self.raw)
            .field("sequence_policy", &self.configuration.sequence_policy())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttrMap({})", self.raw)
    }
}
