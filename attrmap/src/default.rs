//! Default-value extension: synthesise and store values for missing keys.
//!
//! [`synthesize`] is the extension itself and is usable by any variant
//! through [`Attr::missing`]. [`AttrDefault`] is the mutable variant built
//! on it. Present keys, merging, equality, copying and state all behave as
//! the core defines them; the factory, the pass-key flag and the sequence
//! policy travel in the [`Configuration`].

use std::{fmt, sync::LazyLock};

use crate::{
    Attr, AttrResult, Configuration, DefaultFactory, InstanceAttributes, Key, MutableAttr,
    RawMapping, ReservedNames, SequencePolicy, Value,
    classify::{CORE_METHODS, DEFAULT_METHODS, MUTABLE_METHODS, TRAIT_METHODS},
};

static RESERVED: LazyLock<ReservedNames> = LazyLock::new(|| {
    ReservedNames::from_groups(&[CORE_METHODS, MUTABLE_METHODS, TRAIT_METHODS, DEFAULT_METHODS])
});

/// Produce a value for the absent `key` from the configured factory and
/// store it in `raw`, so later reads return the stored value.
///
/// Returns `None` when no factory is configured or `raw` is read-only.
pub fn synthesize(raw: &RawMapping, configuration: &Configuration, key: &Key) -> Option<Value> {
    if raw.is_frozen() {
        return None;
    }
    let value = configuration.produce_default(key)?;
    tracing::debug!(
        %key,
        factory = configuration.default_factory().map(DefaultFactory::name),
        pass_key = configuration.pass_key(),
        "synthesised default value"
    );
    raw.insert(key.clone(), value.clone()).ok()?;
    Some(value)
}

/// Mutable mapping that fills missing keys from a default factory.
///
/// # Examples
///
/// ```
/// use attrmap::{Attr, AttrDefault, DefaultFactory, Value};
///
/// let lists = AttrDefault::new(Some(DefaultFactory::new("list", |_| Value::List(Vec::new()))));
/// assert_eq!(lists.get_attr("foo")?, Value::Tuple(Vec::new()));
/// assert!(lists.contains("foo"));
/// # Ok::<_, attrmap::AttrError>(())
/// ```
#[derive(Clone, Default)]
pub struct AttrDefault {
    raw: RawMapping,
    configuration: Configuration,
    attributes: InstanceAttributes,
}

impl AttrDefault {
    /// Empty mapping using `default_factory` for missing keys.
    #[must_use]
    pub fn new(default_factory: Option<DefaultFactory>) -> Self {
        Self::from_raw(
            RawMapping::new(),
            Configuration::new().with_default_factory(default_factory),
        )
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

    /// Replace the initial content.
    #[must_use]
    pub fn with_raw(mut self, raw: RawMapping) -> Self {
        self.raw = raw;
        self
    }

    /// Replace the sequence policy used for reads.
    #[must_use]
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.configuration = self.configuration.with_sequence_policy(policy);
        self
    }

    /// Choose whether the missing key is passed to the factory.
    #[must_use]
    pub fn with_pass_key(mut self, pass_key: bool) -> Self {
        self.configuration = self.configuration.with_pass_key(pass_key);
        self
    }

    /// Factory used for missing keys, if any.
    #[must_use]
    pub const fn default_factory(&self) -> Option<&DefaultFactory> {
        self.configuration.default_factory()
    }

    /// Whether the missing key is passed to the factory.
    #[must_use]
    pub const fn pass_key(&self) -> bool {
        self.configuration.pass_key()
    }
}

impl Attr for AttrDefault {
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

    fn missing(&self, key: &Key) -> Option<Value> {
        synthesize(&self.raw, &self.configuration, key)
    }
}

impl MutableAttr for AttrDefault {}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for AttrDefault {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_raw(iter.into_iter().collect(), Configuration::new())
    }
}

impl From<RawMapping> for AttrDefault {
    fn from(raw: RawMapping) -> Self {
        Self::from_raw(raw, Configuration::new())
    }
}

impl fmt::Debug for AttrDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrDefault")
            .field("raw", &self.raw)
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AttrDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.default_factory() {
            Some(factory) => write!(f, "AttrDefault({factory}, {}, {})", self.pass_key(), self.raw),
            None => write!(f, "AttrDefault(null, {}, {})", self.pass_key(), self.raw),
        }
    }
}
