//! Serialising and rebuilding instances through `State`.

mod common;

use attrmap::{
    Attr, AttrDefault, AttrMap, ErrorKind, FactoryRegistry, MutableAttr, SequencePolicy,
    SerializedState, State, Value,
};
use common::{build, raw, variant_tests};
use rstest::rstest;

fn round_trip<M: Attr>(source: &M, registry: &FactoryRegistry) -> M {
    let encoded = serde_json::to_string(&source.to_state()).expect("encode state");
    let decoded: SerializedState = serde_json::from_str(&encoded).expect("decode state");
    M::from_state(decoded.resolve(registry).expect("resolve factory")).expect("rebuild")
}

fn sequence_data() -> attrmap::RawMapping {
    let element = || Value::Map(raw([("a", "b")]));
    raw([
        ("list", Value::List(vec![element()])),
        ("tuple", Value::Tuple(vec![element()])),
    ])
}

fn empty_and_flat<M: Attr>() {
    let registry = FactoryRegistry::new();
    let empty: M = build(attrmap::RawMapping::new(), SequencePolicy::Tuple);
    assert!(round_trip(&empty, &registry).is_empty());

    let flat: M = build(raw([("foo", "bar")]), SequencePolicy::Tuple);
    let loaded = round_trip(&flat, &registry);
    assert_eq!(loaded.raw(), flat.raw());
}

fn policy_survives<M: Attr>() {
    let registry = FactoryRegistry::new();
    for policy in [
        SequencePolicy::Tuple,
        SequencePolicy::List,
        SequencePolicy::PassThrough,
    ] {
        let source: M = build(sequence_data(), policy);
        let loaded = round_trip(&source, &registry);
        assert_eq!(loaded.raw(), source.raw());
        assert_eq!(loaded.configuration().sequence_policy(), policy);

        assert!(matches!(
            loaded.raw().get(&"list".into()),
            Some(Value::List(_))
        ));
        assert!(matches!(
            loaded.raw().get(&"tuple".into()),
            Some(Value::Tuple(_))
        ));
        let read = loaded.get_attr("list").expect("list");
        match policy {
            SequencePolicy::Tuple => assert!(read.is_tuple()),
            SequencePolicy::List => assert!(read.is_list()),
            SequencePolicy::PassThrough => assert!(read.as_value().is_some()),
        }
    }
}

fn state_is_detached<M: Attr>() {
    let source: M = build(
        raw([("sub", Value::Map(raw([("x", 1)])))]),
        SequencePolicy::Tuple,
    );
    let state = source.to_state();
    let sub = source.raw().get(&"sub".into()).expect("nested");
    let captured = state.mapping().get(&"sub".into()).expect("nested");
    assert!(
        !sub.as_mapping()
            .zip(captured.as_mapping())
            .is_some_and(|(a, b)| a.ptr_eq(b))
    );
}

variant_tests!(empty_and_flat, policy_survives, state_is_detached);

#[rstest]
#[case(false)]
#[case(true)]
fn default_factory_and_flag_survive(#[case] pass_key: bool) {
    let registry = FactoryRegistry::with_builtins();
    let source = AttrDefault::new(registry.get("list").cloned())
        .with_raw(raw([("foo", "bar")]))
        .with_sequence_policy(SequencePolicy::List)
        .with_pass_key(pass_key);
    let loaded = round_trip(&source, &registry);
    assert_eq!(loaded, source);
    assert_eq!(loaded.default_factory().map(|f| f.name()), Some("list"));
    assert_eq!(loaded.pass_key(), pass_key);
    assert_eq!(
        loaded.configuration().sequence_policy(),
        SequencePolicy::List
    );
    assert!(loaded.get_attr("fresh").expect("synthesised").is_list());
}

#[test]
fn unknown_factory_names_fail_to_resolve() {
    let source = AttrDefault::new(FactoryRegistry::with_builtins().get("map").cloned());
    let encoded = serde_json::to_string(&source.to_state()).expect("encode state");
    let decoded: SerializedState = serde_json::from_str(&encoded).expect("decode state");
    let err = decoded
        .resolve(&FactoryRegistry::new())
        .expect_err("registry is empty");
    assert_eq!(err.kind(), ErrorKind::NotPermitted);
}

#[test]
fn state_rebuilds_as_any_variant() {
    let state = State::new(raw([("foo", "bar")]), SequencePolicy::List.into());
    let mapping = AttrMap::from_state(state).expect("rebuild");
    assert_eq!(mapping.get_attr("foo").expect("read"), "bar");
    assert_eq!(
        mapping.configuration().sequence_policy(),
        SequencePolicy::List
    );
}

#[test]
fn escape_flag_survives_transport() {
    let mut source = AttrMap::from_iter([("foo", "bar")]);
    source.set_allow_invalid_attributes(true).expect("escape");
    let loaded = round_trip(&source, &FactoryRegistry::new());
    assert!(loaded.allows_invalid_attributes());

    let legacy: SerializedState =
        serde_json::from_str(r#"{"mapping": [[{"str": "foo"}, {"str": "bar"}]]}"#)
            .expect("decode state without the flag");
    let state = legacy.resolve(&FactoryRegistry::new()).expect("resolve");
    assert!(!state.allows_invalid_attributes());
}
