//! Unit tests for the `Optional` combinators.

use std::{cell::Cell, cmp::Ordering};

use rstest::rstest;

use super::Optional;
use crate::ContractError;

#[rstest]
fn absent_value_is_a_contract_violation() {
    let absent: Optional<u8> = Optional::absent();
    assert_eq!(absent.value(), Err(ContractError::ValueMissing));
    assert_eq!(absent.into_value(), Err(ContractError::ValueMissing));
}

#[rstest]
#[case(Optional::present(4), 4)]
#[case(Optional::absent(), 9)]
fn value_or_falls_back_only_when_absent(#[case] input: Optional<u8>, #[case] expected: u8) {
    assert_eq!(input.value_or(9), expected);
    assert_eq!(input.value_or_else(|| 9), expected);
}

#[rstest]
fn fallback_closure_is_lazy() {
    let calls = Cell::new(0);
    let value = Optional::present(1).value_or_else(|| {
        calls.set(calls.get() + 1);
        2
    });
    assert_eq!(value, 1);
    assert_eq!(calls.get(), 0);
}

#[rstest]
fn value_or_default_uses_the_payload_default() {
    assert_eq!(Optional::<String>::absent().value_or_default(), "");
}

#[rstest]
fn map_and_flat_map_propagate_absence() {
    let absent: Optional<u8> = Optional::absent();
    assert_eq!(absent.map(|n| n + 1), Optional::absent());
    assert_eq!(absent.flat_map(|n| Optional::present(n + 1)), Optional::absent());
    assert_eq!(Optional::present(1).map(|n| n + 1), Optional::present(2));
    assert_eq!(
        Optional::present(1).flat_map(|_| Optional::<u8>::absent()),
        Optional::absent()
    );
}

#[rstest]
fn filter_never_calls_the_predicate_when_absent() {
    let called = Cell::new(false);
    let result = Optional::<u8>::absent().filter(|_| {
        called.set(true);
        true
    });
    assert!(result.is_absent());
    assert!(!called.get());
}

#[rstest]
#[case(Optional::present(2), true, Optional::present(2))]
#[case(Optional::present(2), false, Optional::absent())]
#[case(Optional::absent(), true, Optional::absent())]
fn filter_if_keeps_payload_when_condition_holds(
    #[case] input: Optional<u8>,
    #[case] condition: bool,
    #[case] expected: Optional<u8>,
) {
    assert_eq!(input.filter_if(condition), expected);
    assert_eq!(input.filter(|_| condition), expected);
}

#[rstest]
fn not_null_collapses_present_none() {
    assert!(Optional::<Option<u8>>::present(None).not_null().is_absent());
    assert_eq!(Optional::present(Some(3)).not_null(), Optional::present(3));
    assert!(Optional::<Option<u8>>::absent().not_null().is_absent());
}

#[rstest]
fn match_with_selects_the_right_branch() {
    let present = Optional::present("x").match_with(|s| s.len(), || 0);
    let absent = Optional::<&str>::absent().match_with(|s| s.len(), || 7);
    assert_eq!((present, absent), (1, 7));
}

#[rstest]
fn if_present_and_if_absent_run_side_effects() {
    let seen = Cell::new(0);
    Optional::present(5).if_present(|n| seen.set(*n));
    Optional::present(5).if_absent(|| seen.set(100));
    assert_eq!(seen.get(), 5);
    Optional::<u8>::absent().if_absent(|| seen.set(6));
    assert_eq!(seen.get(), 6);
}

#[rstest]
fn or_variants_substitute_absent() {
    assert_eq!(Optional::absent().or(1), Optional::present(1));
    assert_eq!(Optional::present(2).or(1), Optional::present(2));
    assert_eq!(Optional::absent().or_else(|| 3), Optional::present(3));
    assert_eq!(
        Optional::<u8>::absent().otherwise(Optional::absent()),
        Optional::absent()
    );
    assert_eq!(
        Optional::present(2).otherwise_with(|| Optional::present(5)),
        Optional::present(2)
    );
}

#[rstest]
fn map_each_transforms_collection_payloads() {
    let doubled = Optional::present(vec![1, 2, 3]).map_each(|n| n * 2);
    assert_eq!(doubled, Optional::present(vec![2, 4, 6]));
    let none = Optional::<Vec<u8>>::absent().map_each(|n| n * 2);
    assert!(none.is_absent());
}

#[rstest]
fn ordering_puts_absent_first() {
    let mut values = vec![
        Optional::present(3),
        Optional::absent(),
        Optional::present(1),
    ];
    values.sort();
    assert_eq!(
        values,
        vec![Optional::absent(), Optional::present(1), Optional::present(3)]
    );
    assert_eq!(Optional::<u8>::absent(), Optional::default());
}

#[rstest]
fn present_none_differs_from_absent() {
    let nullable: Optional<Option<u8>> = Optional::present(None);
    assert!(nullable.has_value());
    assert_ne!(nullable, Optional::absent());
}

#[rstest]
fn option_conversions_round_trip() {
    let from: Optional<u8> = 7_u8.into();
    assert_eq!(Option::from(from), Some(7));
    assert_eq!(Optional::from_option(None::<u8>), Optional::absent());
    assert_eq!(from.iter().copied().sum::<u8>(), 7);
    assert_eq!(from.as_ref().map(|n| n + 1), Optional::present(8));
}

#[rstest]
#[case(Optional::absent(), Optional::present(0), Ordering::Less)]
#[case(Optional::present(3), Optional::present(5), Ordering::Less)]
#[case(Optional::present(5), Optional::present(3), Ordering::Greater)]
#[case(Optional::absent(), Optional::absent(), Ordering::Equal)]
fn absent_orders_before_every_present(
    #[case] left: Optional<i32>,
    #[case] right: Optional<i32>,
    #[case] expected: Ordering,
) {
    assert_eq!(left.cmp(&right), expected);
}
