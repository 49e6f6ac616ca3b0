//! Sequence rebuilding under each policy.

mod common;

use attrmap::{Attr, AttrMap, Item, SequencePolicy, Value};
use common::{build, raw, variant_tests};
use rstest::rstest;

fn sequence_data() -> attrmap::RawMapping {
    let element = || Value::Map(raw([("foo", "bar")]));
    raw([
        ("list", Value::List(vec![element()])),
        ("tuple", Value::Tuple(vec![element()])),
    ])
}

fn first_foo<M: Attr>(item: &Item<M>) -> Item<M> {
    item.at(0)
        .expect("first element")
        .attr("foo")
        .expect("wrapped element")
}

fn tuple_policy<M: Attr>() {
    let mapping: M = build(sequence_data(), SequencePolicy::Tuple);
    for name in ["list", "tuple"] {
        let sequence = mapping.get_attr(name).expect("sequence");
        assert!(sequence.is_tuple(), "{name} should be a tuple");
        assert_eq!(first_foo(&sequence), "bar");
    }
}

fn list_policy<M: Attr>() {
    let mapping: M = build(sequence_data(), SequencePolicy::List);
    for name in ["list", "tuple"] {
        let sequence = mapping.get_attr(name).expect("sequence");
        assert!(sequence.is_list(), "{name} should be a list");
        assert_eq!(first_foo(&sequence), "bar");
    }
}

fn pass_through_policy<M: Attr>() {
    let mapping: M = build(sequence_data(), SequencePolicy::PassThrough);

    let list = mapping.get_attr("list").expect("list");
    assert!(matches!(list.as_value(), Some(Value::List(_))));
    assert!(list.at(0).is_none());

    let tuple = mapping.get_attr("tuple").expect("tuple");
    assert!(matches!(tuple.as_value(), Some(Value::Tuple(_))));
    let untouched = tuple
        .as_value()
        .and_then(Value::as_slice)
        .and_then(<[Value]>::first)
        .expect("element");
    assert!(untouched.is_mapping());
}

fn policy_reaches_nested_instances<M: Attr>() {
    let inner = raw([("seq", Value::Tuple(vec![Value::Int(1), Value::Int(2)]))]);
    let mapping: M = build(raw([("inner", Value::Map(inner))]), SequencePolicy::List);
    let nested = mapping.get_attr("inner").expect("nested");
    let child = nested.as_mapping().expect("mapping");
    assert_eq!(child.configuration().sequence_policy(), SequencePolicy::List);
    assert!(nested.attr("seq").expect("sequence").is_list());
}

fn reads_never_rewrite_storage<M: Attr>() {
    let mapping: M = build(sequence_data(), SequencePolicy::List);
    let _wrapped = mapping.get_attr("tuple").expect("sequence");
    assert!(matches!(
        mapping.raw().get(&"tuple".into()),
        Some(Value::Tuple(_))
    ));
}

fn wrapping_is_idempotent<M: Attr>() {
    for policy in [
        SequencePolicy::Tuple,
        SequencePolicy::List,
        SequencePolicy::PassThrough,
    ] {
        let mapping: M = build(sequence_data(), policy);
        for (key, item) in mapping.items().expect("items") {
            let rewrapped = mapping.wrap(item.to_value()).expect("rewrap");
            assert_eq!(rewrapped, item, "{key} changed when wrapped twice under {policy}");
        }
        let whole = mapping
            .wrap(Value::Map(mapping.raw().clone()))
            .expect("wrap mapping");
        let again = mapping.wrap(whole.to_value()).expect("rewrap mapping");
        assert_eq!(again, whole);
        assert_eq!(again, *mapping.raw());
    }
}

variant_tests!(
    tuple_policy,
    list_policy,
    pass_through_policy,
    policy_reaches_nested_instances,
    reads_never_rewrite_storage,
    wrapping_is_idempotent,
);

#[rstest]
#[case(SequencePolicy::Tuple, Value::Tuple(vec![Value::Int(1), Value::Int(2)]))]
#[case(SequencePolicy::List, Value::List(vec![Value::Int(1), Value::Int(2)]))]
#[case(SequencePolicy::PassThrough, Value::List(vec![Value::Int(1), Value::Int(2)]))]
fn scalar_sequences_follow_policy(#[case] policy: SequencePolicy, #[case] expected: Value) {
    let mapping = AttrMap::from_iter([("s", Value::List(vec![Value::Int(1), Value::Int(2)]))])
        .with_sequence_policy(policy);
    assert_eq!(mapping.get_attr("s").expect("sequence"), expected);
}

#[test]
fn text_and_bytes_are_not_sequences() {
    let mapping = AttrMap::from_iter([
        ("text", Value::from("abc")),
        ("bytes", Value::Bytes(b"abc".to_vec())),
    ])
    .with_sequence_policy(SequencePolicy::List);
    assert!(mapping.get_attr("text").expect("text").as_value().is_some());
    assert!(mapping.get_attr("bytes").expect("bytes").as_value().is_some());
}

#[test]
fn parsed_lists_follow_the_policy() {
    let document = common::from_json(test_helpers::fixtures::sequence_document());
    let listed = AttrMap::from(document).with_sequence_policy(SequencePolicy::List);
    let sequence = listed.get_attr("list").expect("list");
    assert!(sequence.is_list());
    assert_eq!(first_foo(&sequence), "bar");
}
