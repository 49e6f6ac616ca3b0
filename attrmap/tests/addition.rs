//! The `+` operator and structural merge across variants.

mod common;

use attrmap::{
    Attr, AttrDefault, AttrMap, ErrorKind, FrozenAttrMap, Key, RawMapping, SequencePolicy, Value,
    merge,
};
use common::{from_json, raw};
use rstest::{fixture, rstest};
use test_helpers::fixtures;

#[fixture]
fn left() -> RawMapping {
    from_json(fixtures::merge_left())
}

#[fixture]
fn right() -> RawMapping {
    from_json(fixtures::merge_right())
}

macro_rules! addition_suite {
    ($($name:ident => $variant:ty),+ $(,)?) => {$(
        mod $name {
            use super::*;

            type V = $variant;

            #[rstest]
            fn empty_operands(left: RawMapping) {
                let empty = RawMapping::new();
                assert_eq!((&V::from(empty.clone()) + &V::from(empty.clone())).expect("sum"), empty);
                assert_eq!((&V::from(empty.clone()) + &empty).expect("sum"), empty);
                assert_eq!((&empty + &V::from(empty.clone())).expect("sum"), empty);

                assert_eq!((&V::from(left.clone()) + &V::default()).expect("sum"), left);
                assert_eq!((&V::from(left.clone()) + &empty).expect("sum"), left);
                assert_eq!((&empty + &V::from(left.clone())).expect("sum"), left);
                assert_eq!((&V::default() + &left).expect("sum"), left);
                assert_eq!((&left + &V::default()).expect("sum"), left);
            }

            #[rstest]
            fn right_operand_wins(left: RawMapping, right: RawMapping) {
                let merged = from_json(fixtures::merged());
                assert_eq!((&V::from(left.clone()) + &V::from(right.clone())).expect("sum"), merged);
                assert_eq!((&V::from(left.clone()) + &right).expect("sum"), merged);
                assert_eq!((&left + &V::from(right.clone())).expect("sum"), merged);

                let opposite = from_json(fixtures::opposite());
                assert_eq!((&V::from(right.clone()) + &V::from(left.clone())).expect("sum"), opposite);
                assert_eq!((&V::from(right.clone()) + &left).expect("sum"), opposite);
                assert_eq!((&right + &V::from(left)).expect("sum"), opposite);
            }

            #[rstest]
            #[case(Value::Int(1))]
            #[case(Value::from("text"))]
            fn non_mappings_are_rejected(#[case] operand: Value) {
                let err = (&V::default() + &operand).expect_err("not a mapping");
                assert_eq!(err.kind(), ErrorKind::NotPermitted);
                let err = (&operand + &V::default()).expect_err("not a mapping");
                assert_eq!(err.kind(), ErrorKind::NotPermitted);
            }

            #[test]
            fn left_configuration_is_kept() {
                let data = raw([("sequence", Value::List(vec![Value::Map(raw([("foo", "bar")]))]))]);
                let as_tuple = (&V::from(data.clone()) + &RawMapping::new()).expect("sum");
                assert!(as_tuple.get_attr("sequence").expect("sequence").is_tuple());

                let listed = V::from(data).with_sequence_policy(SequencePolicy::List);
                let as_list = (&listed + &RawMapping::new()).expect("sum");
                assert!(as_list.get_attr("sequence").expect("sequence").is_list());
                let other = V::default().with_sequence_policy(SequencePolicy::List);
                let both = (&listed + &other).expect("sum");
                assert!(both.get_attr("sequence").expect("sequence").is_list());
            }
        }
    )+};
}

addition_suite!(
    frozen => FrozenAttrMap,
    mutable => AttrMap,
    defaulted => AttrDefault,
);

#[rstest]
fn operands_are_not_modified(left: RawMapping, right: RawMapping) {
    let before_left = left.deep_copy();
    let before_right = right.deep_copy();
    let sum = (&AttrMap::from(left.clone()) + &right).expect("sum");
    assert_eq!(left, before_left);
    assert_eq!(right, before_right);
    assert!(!sum.raw().ptr_eq(&left));
}

#[test]
fn merged_keys_keep_left_order_then_right() {
    let merged = merge(
        &raw([("b", 1), ("a", 1)]),
        &raw([("c", 2), ("a", 2), ("d", 2)]),
    );
    assert_eq!(
        merged.keys(),
        vec![Key::from("b"), Key::from("a"), Key::from("c"), Key::from("d")]
    );
    assert_eq!(merged.get(&Key::from("a")), Some(Value::Int(2)));
}

#[test]
fn mixed_variants_take_the_left_type() {
    let frozen = FrozenAttrMap::from_iter([("a", 1)]);
    let mutable = AttrMap::from_iter([("b", 2)]);
    let sum: FrozenAttrMap = (&frozen + &mutable).expect("sum");
    assert_eq!(sum, raw([("a", 1), ("b", 2)]));
    let flipped: AttrMap = (&mutable + &frozen).expect("sum");
    assert_eq!(flipped, sum);
}
