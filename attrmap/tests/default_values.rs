//! Default-value synthesis on the default-filling variant.

mod common;

use attrmap::{
    Attr, AttrDefault, DefaultFactory, ErrorKind, Key, MutableAttr, RawMapping, SequencePolicy,
    Value,
};
use common::raw;
use rstest::{fixture, rstest};
use test_helpers::counter::CallCounter;

#[fixture]
fn lists() -> AttrDefault {
    AttrDefault::new(Some(DefaultFactory::new("list", |_| Value::List(Vec::new()))))
        .with_raw(raw([("foo", "bar")]))
}

fn key_echo() -> DefaultFactory {
    DefaultFactory::new("echo", |key| {
        key.and_then(Key::as_str)
            .map_or(Value::Null, |name| Value::from(name.repeat(2)))
    })
}

#[test]
fn no_factory_behaves_like_the_mutable_variant() {
    let mapping = AttrDefault::new(None);
    assert_eq!(
        mapping.get_item("foo").expect_err("absent").kind(),
        ErrorKind::MissingKey
    );
    assert_eq!(
        mapping.get_attr("foo").expect_err("absent").kind(),
        ErrorKind::MissingAttribute
    );
    assert!(mapping.is_empty());
}

#[rstest]
fn present_keys_ignore_the_factory(lists: AttrDefault) {
    assert_eq!(lists.get_item("foo").expect("present"), "bar");
    assert_eq!(lists.get_attr("foo").expect("present"), "bar");
    assert_eq!(lists.len(), 1);
}

#[rstest]
fn missing_keys_are_synthesised_and_stored(lists: AttrDefault) {
    assert!(lists.get_item("bar").expect("synthesised").is_tuple());
    assert!(lists.contains("bar"));
    assert!(lists.get_attr("baz").expect("synthesised").is_tuple());
    assert!(lists.contains("baz"));
    assert_eq!(
        lists.raw().get(&Key::from("bar")),
        Some(Value::List(Vec::new()))
    );
    assert_eq!(lists.keys().len(), 3);
}

#[rstest]
fn non_text_keys_are_synthesised_through_items(lists: AttrDefault) {
    assert!(lists.get_item(1).expect("synthesised").is_tuple());
    assert!(lists.contains(1));
}

#[rstest]
fn unreachable_names_are_not_synthesised(lists: AttrDefault) {
    for name in ["_hidden", "pop", "default_factory"] {
        assert_eq!(
            lists.get_attr(name).expect_err("unreachable").kind(),
            ErrorKind::MissingAttribute
        );
        assert!(!lists.contains(name), "{name} should not be stored");
    }
}

#[rstest]
fn convenience_reads_never_synthesise(mut lists: AttrDefault) {
    assert!(lists.get("bar").expect("get").is_none());
    assert_eq!(lists.get_or("bar", 0).expect("get_or"), 0);
    assert_eq!(
        lists.set_default("qux", "given").expect("set_default"),
        "given"
    );
    assert!(!lists.contains("bar"));
}

#[test]
fn key_is_passed_only_when_requested() {
    let keyed = AttrDefault::new(Some(key_echo())).with_pass_key(true);
    assert_eq!(keyed.get_attr("foo").expect("synthesised"), "foofoo");
    assert_eq!(keyed.get_item("bar").expect("synthesised"), "barbar");

    let unkeyed = AttrDefault::new(Some(key_echo()));
    assert_eq!(
        unkeyed.get_attr("foo").expect("synthesised"),
        Value::Null
    );
}

#[test]
fn factory_runs_once_per_key() {
    let calls = CallCounter::default();
    let counter = calls.clone();
    let mapping = AttrDefault::new(Some(DefaultFactory::new("count", move |_| {
        counter.bump();
        Value::Int(0)
    })));
    for _ in 0..3 {
        assert_eq!(mapping.get_attr("counter").expect("read"), 0);
    }
    assert_eq!(calls.count(), 1);
}

#[test]
fn nested_instances_inherit_the_factory() {
    let mapping = AttrDefault::new(Some(DefaultFactory::new("map", |_| {
        Value::Map(RawMapping::new())
    })))
    .with_sequence_policy(SequencePolicy::List);

    let leaf = mapping
        .get_attr("a")
        .expect("synthesised")
        .attr("b")
        .expect("synthesised")
        .attr("c")
        .expect("synthesised");
    assert!(leaf.as_mapping().is_some());
    let expected = raw([(
        "a",
        Value::Map(raw([("b", Value::Map(raw([("c", Value::Map(RawMapping::new()))])))])),
    )]);
    assert_eq!(mapping, expected);

    let child = mapping
        .get_attr("a")
        .expect("stored")
        .into_mapping()
        .expect("mapping");
    assert_eq!(child.default_factory().map(DefaultFactory::name), Some("map"));
    assert_eq!(child.configuration().sequence_policy(), SequencePolicy::List);
}

#[rstest]
fn deletion_and_writes_behave_normally(mut lists: AttrDefault) {
    lists.set_attr("alpha", "bravo").expect("write");
    lists.del_attr("foo").expect("delete");
    assert!(!lists.contains("foo"));
    assert_eq!(lists.pop("alpha").expect("pop"), "bravo");
    assert!(lists.pop("absent").is_err());
    assert!(!lists.contains("absent"));
}

#[rstest]
fn merging_keeps_the_factory(lists: AttrDefault) {
    let merged = (&lists + &raw([("other", 1)])).expect("merge");
    assert_eq!(merged.default_factory().map(DefaultFactory::name), Some("list"));
    assert!(merged.get_attr("fresh").expect("synthesised").is_tuple());
    assert!(!lists.contains("fresh"));
}

#[test]
fn default_method_names_are_shadowed() {
    let mut mapping = AttrDefault::new(None);
    let err = mapping
        .set_attr("pass_key", true)
        .expect_err("method name");
    assert_eq!(err.kind(), ErrorKind::NotPermitted);
    mapping.set_item("pass_key", true).expect("item write");
    assert!(mapping.get_attr("pass_key").is_err());
}
