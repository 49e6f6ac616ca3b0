//! Per-instance configuration threaded through every derived instance.
//!
//! A [`Configuration`] is copied onto each nested instance built during
//! recursive reads and merges, so children rebuild sequences and synthesise
//! defaults exactly as their parent does.

use std::{collections::BTreeMap, fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::{AttrError, AttrResult, Key, RawMapping, Value};

/// How ordered sequences are rebuilt when read out of a mapping.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePolicy {
    /// Rebuild as an immutable [`Value::Tuple`]-like sequence.
    #[default]
    Tuple,
    /// Rebuild as a mutable [`Value::List`]-like sequence.
    List,
    /// Leave the sequence and its elements untouched.
    PassThrough,
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::PassThrough => "pass_through",
        })
    }
}

/// Text that names no [`SequencePolicy`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown sequence policy '{input}'")]
pub struct ParsePolicyError {
    input: String,
}

impl ParsePolicyError {
    /// The rejected text, trimmed and lowercased.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for SequencePolicy {
    type Err = ParsePolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "tuple" => Ok(Self::Tuple),
            "list" => Ok(Self::List),
            "pass_through" | "passthrough" | "none" => Ok(Self::PassThrough),
            other => Err(ParsePolicyError {
                input: other.to_owned(),
            }),
        }
    }
}

type Produce = dyn Fn(Option<&Key>) -> Value;

/// A named generator of values for missing keys.
///
/// The closure receives `Some(key)` only when the owning configuration has
/// `pass_key` set. The name identifies the factory across serialisation.
#[derive(Clone)]
pub struct DefaultFactory {
    name: Rc<str>,
    produce: Rc<Produce>,
}

impl DefaultFactory {
    /// Wrap `produce` under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrmap::{DefaultFactory, Key, Value};
    ///
    /// let double = DefaultFactory::new("double", |key| match key.and_then(Key::as_str) {
    ///     Some(name) => Value::from(name.repeat(2)),
    ///     None => Value::Null,
    /// });
    /// assert_eq!(double.produce(Some(&Key::from("ab"))), "abab");
    /// assert_eq!(double.produce(None), Value::Null);
    /// ```
    pub fn new(name: &str, produce: impl Fn(Option<&Key>) -> Value + 'static) -> Self {
        Self {
            name: Rc::from(name),
            produce: Rc::new(produce),
        }
    }

    /// Factory name used for equality and serialisation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate a value, passing `key` through to the closure.
    #[must_use]
    pub fn produce(&self, key: Option<&Key>) -> Value {
        (self.produce)(key)
    }
}

impl PartialEq for DefaultFactory {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultFactory").field(&self.name).finish()
    }
}

impl fmt::Display for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

/// Name-to-factory lookup used when rebuilding serialised state.
#[derive(Clone, Debug, Default)]
pub struct FactoryRegistry(BTreeMap<String, DefaultFactory>);

impl FactoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the `null`, `list`, `tuple` and `map`
    /// factories.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DefaultFactory::new("null", |_| Value::Null));
        registry.register(DefaultFactory::new("list", |_| Value::List(Vec::new())));
        registry.register(DefaultFactory::new("tuple", |_| Value::Tuple(Vec::new())));
        registry.register(DefaultFactory::new("map", |_| Value::Map(RawMapping::new())));
        registry
    }

    /// Add or replace a factory under its own name.
    pub fn register(&mut self, factory: DefaultFactory) -> &mut Self {
        self.0.insert(factory.name().to_owned(), factory);
        self
    }

    /// Look up a factory by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DefaultFactory> {
        self.0.get(name)
    }

    /// Look up a factory by name, failing with
    /// [`AttrError::UnknownFactory`] when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::UnknownFactory`] if `name` was never registered.
    pub fn resolve(&self, name: &str) -> AttrResult<DefaultFactory> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AttrError::UnknownFactory {
                name: name.to_owned(),
            })
    }
}

/// Settings bundle carried by every instance and its nested children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Configuration {
    sequence_policy: SequencePolicy,
    default_factory: Option<DefaultFactory>,
    pass_key: bool,
}

impl Configuration {
    /// Tuple policy, no factory, key not passed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sequence policy.
    #[must_use]
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.sequence_policy = policy;
        self
    }

    /// Replace the default factory.
    #[must_use]
    pub fn with_default_factory(mut self, factory: Option<DefaultFactory>) -> Self {
        self.default_factory = factory;
        self
    }

    /// Choose whether the missing key is passed to the factory.
    #[must_use]
    pub const fn with_pass_key(mut self, pass_key: bool) -> Self {
        self.pass_key = pass_key;
        self
    }

    /// Sequence policy applied during recursive reads.
    #[must_use]
    pub const fn sequence_policy(&self) -> SequencePolicy {
        self.sequence_policy
    }

    /// Factory used for missing keys, if any.
    #[must_use]
    pub const fn default_factory(&self) -> Option<&DefaultFactory> {
        self.default_factory.as_ref()
    }

    /// Whether the missing key is passed to the factory.
    #[must_use]
    pub const fn pass_key(&self) -> bool {
        self.pass_key
    }

    /// Synthesise a value for `key` when a factory is configured.
    #[must_use]
    pub fn produce_default(&self, key: &Key) -> Option<Value> {
        self.default_factory
            .as_ref()
            .map(|factory| factory.produce(self.pass_key.then_some(key)))
    }
}

impl From<SequencePolicy> for Configuration {
    fn from(policy: SequencePolicy) -> Self {
        Self::new().with_sequence_policy(policy)
    }
}

/// Factories are written by name only.
impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Configuration", 3)?;
        state.serialize_field("sequence_policy", &self.sequence_policy)?;
        state.serialize_field(
            "default_factory",
            &self.default_factory.as_ref().map(DefaultFactory::name),
        )?;
        state.serialize_field("pass_key", &self.pass_key)?;
        state.end()
    }
}

/// Deserialised form of a [`Configuration`] whose factory is still a name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerializedConfiguration {
    /// Sequence policy.
    pub sequence_policy: SequencePolicy,
    /// Name of the default factory, if any.
    pub default_factory: Option<String>,
    /// Whether the missing key is passed to the factory.
    pub pass_key: bool,
}

impl SerializedConfiguration {
    /// Resolve the factory name against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::UnknownFactory`] when the named factory is not
    /// registered.
    pub fn resolve(self, registry: &FactoryRegistry) -> AttrResult<Configuration> {
        let factory = self
            .default_factory
            .as_deref()
            .map(|name| registry.resolve(name))
            .transpose()?;
        Ok(Configuration {
            sequence_policy: self.sequence_policy,
            default_factory: factory,
            pass_key: self.pass_key,
        })
    }
}
