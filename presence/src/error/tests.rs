//! Unit tests for error records, faults, and aggregation.

use std::error::Error as _;

use anyhow::{Result, ensure};
use rstest::rstest;

use super::{AggregatedFaults, ContractError, ErrorInfo, Fault};

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct DiskOnFire;

#[rstest]
fn from_error_uses_short_type_name_and_message() -> Result<()> {
    let info = ErrorInfo::from_error(DiskOnFire);
    ensure!(info.code() == "DiskOnFire", "unexpected code {}", info.code());
    ensure!(info.description() == "disk on fire");
    ensure!(info.cause().is_some(), "cause should be retained");
    Ok(())
}

#[rstest]
fn overrides_replace_derived_fields() {
    let info = ErrorInfo::from_error(DiskOnFire)
        .with_code("Io")
        .with_description("storage failure");
    assert_eq!(info.code(), "Io");
    assert_eq!(info.description(), "storage failure");
}

#[rstest]
fn aggregate_faults_are_summarised() {
    let fault = Fault::aggregate(vec![Fault::failed("A", "a"), Fault::failed("B", "b")]);
    let info = ErrorInfo::from_error(fault);
    assert_eq!(info.code(), "Fault");
    assert_eq!(
        info.description(),
        "Aggregate exception 'One or more errors occurred.': ['a','b']"
    );
}

#[rstest]
fn bare_aggregations_are_summarised() {
    let faults = AggregatedFaults::new(vec![Fault::failed("A", "a"), Fault::failed("B", "b")]);
    let info = ErrorInfo::from_error(faults);
    assert_eq!(info.code(), "AggregatedFaults");
    assert_eq!(info.description(), "Aggregate exception '1: a\n2: b': ['a','b']");
}

#[rstest]
fn equality_ignores_the_cause() {
    let derived = ErrorInfo::from_error(DiskOnFire);
    let plain = ErrorInfo::new("DiskOnFire", "disk on fire");
    assert_eq!(derived, plain);
}

#[rstest]
fn equality_includes_side_data() {
    let bare = ErrorInfo::new("X", "bad");
    let tagged = ErrorInfo::new("X", "bad").with_entry("field", "name");
    assert_ne!(bare, tagged);
    assert_eq!(
        tagged.data().and_then(|data| data.get("field")),
        Some(&serde_json::json!("name"))
    );
}

#[rstest]
fn to_fault_builds_a_fresh_failure_each_time() -> Result<()> {
    let info = ErrorInfo::from_error(DiskOnFire);
    let first = info.to_fault();
    let second = info.to_fault();
    ensure!(first.code() == "DiskOnFire" && second.code() == "DiskOnFire");
    ensure!(first.to_string() == "disk on fire");
    let source = first.source().map(ToString::to_string);
    ensure!(source.as_deref() == Some("disk on fire"), "source {source:?}");
    Ok(())
}

#[rstest]
#[case(Fault::failed("X", "bad"), "X", false)]
#[case(Fault::cancelled(), "OperationCancelled", true)]
#[case(Fault::aggregate(vec![Fault::failed("A", "a")]), "A", false)]
#[case(Fault::aggregate(Vec::new()), "Unknown", false)]
fn fault_codes(#[case] fault: Fault, #[case] code: &str, #[case] cancelled: bool) {
    assert_eq!(fault.code(), code);
    assert_eq!(fault.is_cancelled(), cancelled);
}

#[rstest]
fn cancelled_fault_describes_the_sentinel() {
    assert_eq!(Fault::cancelled().to_string(), "Operation was cancelled");
}

#[rstest]
fn aggregated_display_enumerates_members() {
    let Fault::Aggregate(faults) =
        Fault::aggregate(vec![Fault::failed("A", "first"), Fault::failed("B", "second")])
    else {
        panic!("expected an aggregate fault");
    };
    assert_eq!(faults.to_string(), "1: first\n2: second");
    assert_eq!(faults.len(), 2);
    assert!(!faults.is_empty());
}

#[rstest]
#[case(ContractError::ValueMissing, "Optional value is missing. Check has_value before attempting to get value.")]
#[case(ContractError::NotAnOptional, "Object is not an Optional.")]
#[case(ContractError::InvalidOperation, "Can't map success result")]
fn contract_messages(#[case] err: ContractError, #[case] message: &str) {
    assert_eq!(err.to_string(), message);
}
