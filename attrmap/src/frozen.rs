//! The read-only mapping variant.

use std::{fmt, sync::LazyLock};

use crate::{
    Attr, AttrResult, Configuration, Key, RawMapping, ReservedNames, SequencePolicy, Value,
    classify::{CORE_METHODS, FROZEN_METHODS, TRAIT_METHODS},
};

static RESERVED: LazyLock<ReservedNames> = LazyLock::new(|| {
    ReservedNames::from_groups(&[CORE_METHODS, TRAIT_METHODS, FROZEN_METHODS])
});

/// Read-only ordered mapping with attribute-style access.
///
/// Every write or delete fails with [`crate::AttrError::ReadOnly`]; nested
/// mappings read from it are read-only too. The storage is frozen: a handle
/// obtained through [`Attr::raw`] or a conversion into [`Value`] refuses
/// writes whichever variant wraps it. Wrapping a writable table takes a
/// frozen copy, so the source stays writable and later writes to it are not
/// seen here.
///
/// # Examples
///
/// ```
/// use attrmap::{Attr, ErrorKind, FrozenAttrMap};
///
/// let mut frozen = FrozenAttrMap::from_iter([("foo", "bar")]);
/// assert_eq!(frozen.get_attr("foo")?, "bar");
/// let err = frozen.set_item("foo", "baz").expect_err("read-only");
/// assert_eq!(err.kind(), ErrorKind::NotPermitted);
/// # Ok::<_, attrmap::AttrError>(())
/// ```
#[derive(Clone)]
pub struct FrozenAttrMap {
    raw: RawMapping,
    configuration: Configuration,
}

impl FrozenAttrMap {
    /// Wrap a frozen version of `raw` with `configuration`.
    ///
    /// Tables that are already frozen are shared; any other table is copied.
    #[must_use]
    pub fn from_raw(raw: RawMapping, configuration: Configuration) -> Self {
        Self {
            raw: raw.frozen_copy(),
            configuration,
        }
    }

    /// Replace the sequence policy used for reads.
    #[must_use]
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.configuration = self.configuration.with_sequence_policy(policy);
        self
    }
}

impl Default for FrozenAttrMap {
    fn default() -> Self {
        Self::from_raw(RawMapping::new(), Configuration::new())
    }
}

impl Attr for FrozenAttrMap {
    const MUTABLE: bool = false;

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
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for FrozenAttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_raw(iter.into_iter().collect(), Configuration::new())
    }
}

impl From<RawMapping> for FrozenAttrMap {
    fn from(raw: RawMapping) -> Self {
        Self::from_raw(raw, Configuration::new())
    }
}

impl fmt::Debug for FrozenAttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenAttrMap")
            .field("raw", &self.raw)
            .field("sequence_policy", &self.configuration.sequence_policy())
            .finish()
    }
}

impl fmt::Display for FrozenAttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenAttrMap({})", self.raw)
    }
}
