//! Helpers shared by the integration test binaries.
#![allow(dead_code, reason = "each test binary uses a subset of these helpers")]

use attrmap::{Attr, Configuration, RawMapping, SequencePolicy, Value};

/// Build a raw mapping from literal pairs.
pub fn raw<I, K, V>(pairs: I) -> RawMapping
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<attrmap::Key>,
    V: Into<Value>,
{
    pairs.into_iter().collect()
}

/// Convert a JSON fixture into a raw mapping.
pub fn from_json(document: serde_json::Value) -> RawMapping {
    RawMapping::try_from(document).expect("fixture is a JSON object")
}

/// Construct any variant around `raw` with the given policy.
pub fn build<M: Attr>(content: RawMapping, policy: SequencePolicy) -> M {
    M::construct(content, Configuration::from(policy)).expect("variant implements construct")
}

/// Construct any variant around `raw` with the default configuration.
pub fn build_default<M: Attr>(content: RawMapping) -> M {
    build(content, SequencePolicy::default())
}

/// Generate one `#[test]` per variant for a generic contract function.
macro_rules! variant_tests {
    ($($contract:ident),+ $(,)?) => {$(
        mod $contract {
            #[test]
            fn frozen() {
                super::$contract::<attrmap::FrozenAttrMap>();
            }

            #[test]
            fn mutable() {
                super::$contract::<attrmap::AttrMap>();
            }

            #[test]
            fn defaulted() {
                super::$contract::<attrmap::AttrDefault>();
            }
        }
    )+};
}

/// Generate one `#[test]` per mutable variant for a generic contract function.
macro_rules! mutable_variant_tests {
    ($($contract:ident),+ $(,)?) => {$(
        mod $contract {
            #[test]
            fn mutable() {
                super::$contract::<attrmap::AttrMap>();
            }

            #[test]
            fn defaulted() {
                super::$contract::<attrmap::AttrDefault>();
            }
        }
    )+};
}

pub(crate) use {mutable_variant_tests, variant_tests};
