//! Unit tests for erased inspection and the shape registry.

use std::any::{Any, TypeId};

use anyhow::{Result, ensure};
use rstest::rstest;
use test_helpers::concurrent::run_concurrently;

use super::{as_outcome, get_value, has_value, is_absent_field, is_optional, is_outcome, register, registry};
use crate::{ContractError, ErrorInfo, Optional, Outcome};

#[rstest]
fn recognises_registered_optionals() {
    let present = Optional::present(String::from("x"));
    let absent: Optional<String> = Optional::absent();
    assert!(is_optional(present.as_any()));
    assert_eq!(has_value(present.as_any()), Ok(true));
    assert_eq!(has_value(absent.as_any()), Ok(false));
}

#[rstest]
#[case(&5_i64)]
#[case(&"text")]
#[case(&Outcome::succeeded(1_u8))]
fn rejects_non_optionals(#[case] value: &dyn Any) {
    assert!(!is_optional(value));
    assert_eq!(has_value(value), Err(ContractError::NotAnOptional));
    assert_eq!(get_value(value).err(), Some(ContractError::NotAnOptional));
}

#[rstest]
fn get_value_borrows_the_payload() -> Result<()> {
    let present = Optional::present(9_u16);
    let payload = get_value(present.as_any())?;
    ensure!(payload.downcast_ref::<u16>() == Some(&9));
    Ok(())
}

#[rstest]
fn get_value_of_absent_is_value_missing() {
    let absent: Optional<u16> = Optional::absent();
    assert_eq!(get_value(absent.as_any()).err(), Some(ContractError::ValueMissing));
}

#[rstest]
fn unregistered_instantiations_are_not_recognised() {
    struct NeverRegistered;
    let value: Optional<NeverRegistered> = Optional::absent();
    assert!(!is_optional(&value));
}

#[rstest]
fn outcomes_are_recognised_after_registration() -> Result<()> {
    #[derive(Debug)]
    struct Receipt;
    register::<Receipt>();
    let outcome: Outcome<Receipt> = Outcome::failed(ErrorInfo::new("X", "bad"));
    ensure!(is_outcome(&outcome));
    let view = as_outcome(&outcome).ok_or_else(|| anyhow::anyhow!("outcome view"))?;
    ensure!(!view.is_success() && !view.is_cancelled());
    ensure!(view.errors().len() == 1);
    ensure!(view.carries_payload());
    Ok(())
}

#[rstest]
fn payloadless_outcome_carries_no_payload() {
    let outcome = Outcome::success();
    let view = as_outcome(outcome.as_any());
    assert_eq!(view.map(|v| v.carries_payload()), Some(false));
}

#[rstest]
fn shapes_are_looked_up_by_payload() -> Result<()> {
    let shape = registry::optional::<u64>();
    let found = registry::shape_for_payload(TypeId::of::<u64>())
        .ok_or_else(|| anyhow::anyhow!("payload lookup failed"))?;
    ensure!(std::ptr::eq(shape, found));
    ensure!(shape.payload_type() == TypeId::of::<u64>());
    ensure!(shape.payload_name() == "u64");
    Ok(())
}

#[rstest]
fn concurrent_first_registration_yields_one_shape() {
    struct Contended;
    let shapes = run_concurrently(16, |_| {
        std::ptr::from_ref(registry::optional::<Contended>()) as usize
    });
    assert!(shapes.windows(2).all(|pair| pair.first() == pair.last()));
    let outcomes = run_concurrently(16, |_| {
        std::ptr::from_ref(registry::outcome::<Contended>()) as usize
    });
    assert!(outcomes.windows(2).all(|pair| pair.first() == pair.last()));
}

#[rstest]
#[case(Optional::present(1), false)]
#[case(Optional::absent(), true)]
fn skip_predicate_matches_absence(#[case] field: Optional<u8>, #[case] skipped: bool) {
    assert_eq!(is_absent_field(&field), skipped);
}
