//! Opaque state used to serialise and rebuild instances.
//!
//! [`State`] pairs raw content with its [`Configuration`]. It serialises
//! with serde, writing the default factory by name; [`SerializedState`] is
//! the deserialised form and needs a [`FactoryRegistry`] to become a
//! [`State`] again.

use serde::{Deserialize, Serialize};

use crate::{
    AttrResult, Configuration, FactoryRegistry, RawMapping, config::SerializedConfiguration,
};

/// Raw content plus configuration captured from an instance, along with
/// whether the instance allowed invalid attributes. Instance attribute
/// values themselves are not captured.
///
/// # Examples
///
/// ```
/// use attrmap::{Attr, AttrMap, FactoryRegistry, SequencePolicy, SerializedState};
///
/// let original = AttrMap::from_iter([("foo", "bar")]).with_sequence_policy(SequencePolicy::List);
/// let encoded = serde_json::to_string(&original.to_state())?;
/// let decoded: SerializedState = serde_json::from_str(&encoded)?;
/// let rebuilt = AttrMap::from_state(decoded.resolve(&FactoryRegistry::new())?)?;
/// assert_eq!(rebuilt, original);
/// assert_eq!(rebuilt.configuration().sequence_policy(), SequencePolicy::List);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct State {
    mapping: RawMapping,
    configuration: Configuration,
    allow_invalid_attributes: bool,
}

impl State {
    /// Pair `mapping` with `configuration`.
    #[must_use]
    pub const fn new(mapping: RawMapping, configuration: Configuration) -> Self {
        Self {
            mapping,
            configuration,
            allow_invalid_attributes: false,
        }
    }

    /// Record whether invalid attributes were allowed.
    #[must_use]
    pub const fn with_allow_invalid_attributes(mut self, allow: bool) -> Self {
        self.allow_invalid_attributes = allow;
        self
    }

    /// Captured raw content.
    #[must_use]
    pub const fn mapping(&self) -> &RawMapping {
        &self.mapping
    }

    /// Captured configuration.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Whether the captured instance allowed invalid attributes.
    #[must_use]
    pub const fn allows_invalid_attributes(&self) -> bool {
        self.allow_invalid_attributes
    }

    /// Split into content and configuration.
    #[must_use]
    pub fn into_parts(self) -> (RawMapping, Configuration) {
        (self.mapping, self.configuration)
    }
}

/// Deserialised [`State`] whose default factory is still a name.
#[derive(Clone, Debug, Deserialize)]
pub struct SerializedState {
    mapping: RawMapping,
    #[serde(default)]
    configuration: SerializedConfiguration,
    #[serde(default)]
    allow_invalid_attributes: bool,
}

impl SerializedState {
    /// Resolve the factory name against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AttrError::UnknownFactory`] when the named factory is
    /// not registered.
    pub fn resolve(self, registry: &FactoryRegistry) -> AttrResult<State> {
        Ok(
            State::new(self.mapping, self.configuration.resolve(registry)?)
                .with_allow_invalid_attributes(self.allow_invalid_attributes),
        )
    }
}
