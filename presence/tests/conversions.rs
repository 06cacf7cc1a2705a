//! Conversions between plain values, results, optionals, and outcomes.

use anyhow::{Result, ensure};
use presence::{
    ErrorInfo, Fault, IntoFailed, IntoSucceeded, Optional, Outcome, ResultOutcomeExt,
};
use rstest::rstest;

#[derive(Debug, thiserror::Error)]
#[error("quota exceeded for {0}")]
struct QuotaExceeded(&'static str);

#[rstest]
fn values_lift_into_successes() {
    assert_eq!("ok".into_succeeded(), Outcome::succeeded("ok"));
}

#[rstest]
fn errors_lift_into_failures() -> Result<()> {
    let outcome: Outcome<u8> = QuotaExceeded("alice").into_failed();
    let error = outcome
        .error()
        .ok_or_else(|| anyhow::anyhow!("failure without an error"))?;
    ensure!(error.code() == "QuotaExceeded");
    ensure!(error.description() == "quota exceeded for alice");
    Ok(())
}

#[rstest]
fn results_convert_both_ways() -> Result<()> {
    let ok: Result<u8, QuotaExceeded> = Ok(3);
    ensure!(ok.into_outcome() == Outcome::succeeded(3));

    let failed: Result<u8, QuotaExceeded> = Err(QuotaExceeded("bob"));
    let outcome = failed.into_outcome();
    let back: Result<u8, Fault> = outcome.into();
    let fault = back.err().ok_or_else(|| anyhow::anyhow!("expected a fault"))?;
    ensure!(fault.code() == "QuotaExceeded");
    Ok(())
}

#[rstest]
fn optionals_and_outcomes_bridge() -> Result<()> {
    let present = Optional::present(5_u8);
    ensure!(present.into_outcome().into_optional() == present);

    let missing = Optional::<u8>::absent().into_outcome();
    ensure!(missing.is_failed());
    ensure!(missing.error().map(ErrorInfo::code) == Some("OptionHasNoValue"));
    ensure!(missing.into_optional().is_absent());
    Ok(())
}

#[rstest]
fn cancellation_is_distinct_from_failure() -> Result<()> {
    let cancelled: Outcome<u8> = Outcome::cancelled();
    let fault = cancelled
        .clone()
        .into_value()
        .err()
        .ok_or_else(|| anyhow::anyhow!("cancelled outcome produced a value"))?;
    ensure!(fault.is_cancelled());
    let flattened = cancelled
        .into_result()
        .err()
        .ok_or_else(|| anyhow::anyhow!("cancelled outcome produced a value"))?;
    ensure!(!flattened.is_cancelled());
    ensure!(flattened.code() == "OperationCancelled");
    Ok(())
}
