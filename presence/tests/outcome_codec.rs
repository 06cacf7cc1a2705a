//! Outcome encoding across the serde impls and both tree backends.

use anyhow::{Result, ensure};
use presence::{
    ErrorInfo, Errors, Outcome,
    codec::{
        NamingPolicy,
        dict::{DictCodec, DictOptions},
        json::{JsonCodec, JsonOptions},
    },
};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use test_helpers::json::{object_keys, parse};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Order {
    id: u32,
    lines: Vec<String>,
}

#[fixture]
fn order() -> Order {
    Order {
        id: 12,
        lines: vec!["tea".into(), "cake".into()],
    }
}

fn inhabitants(order: Order) -> Result<Vec<Outcome<Order>>> {
    Ok(vec![
        Outcome::succeeded(order),
        Outcome::failed(ErrorInfo::new("X", "bad").with_entry("attempt", 2)),
        Outcome::failed_with(Errors::try_from(vec![
            ErrorInfo::new("A", "first"),
            ErrorInfo::new("B", "second"),
        ])?),
        Outcome::cancelled(),
    ])
}

#[rstest]
fn serde_round_trips_every_inhabitant(order: Order) -> Result<()> {
    for outcome in inhabitants(order)? {
        let text = serde_json::to_string(&outcome)?;
        let back: Outcome<Order> = serde_json::from_str(&text)?;
        ensure!(back == outcome, "{text} decoded as {back:?}");
    }
    Ok(())
}

#[rstest]
fn backends_agree_with_serde(order: Order) -> Result<()> {
    let json = JsonCodec::default();
    let dict = DictCodec::default();
    for outcome in inhabitants(order)? {
        let via_serde = serde_json::to_value(&outcome)?;
        let via_json = json.to_value(&outcome)?;
        ensure!(via_serde == via_json, "{via_serde} != {via_json}");

        let via_dict = dict.to_value(&outcome)?;
        let dict_as_json: serde_json::Value = via_dict.deserialize()?;
        ensure!(dict_as_json == via_serde, "{dict_as_json} != {via_serde}");
        ensure!(dict.from_value::<Order>(via_dict)? == Some(outcome.clone()));
        ensure!(json.from_value::<Order>(via_json)? == Some(outcome));
    }
    Ok(())
}

#[rstest]
fn serde_writes_the_success_flag_first(order: Order) -> Result<()> {
    let text = serde_json::to_string(&Outcome::succeeded(order))?;
    ensure!(object_keys(&parse(&text)?)? == ["IsSuccess", "Value"]);
    Ok(())
}

#[rstest]
fn failed_tree_decodes_to_a_failure() -> Result<()> {
    let text = r#"{"IsSuccess":false,"Errors":[{"Code":"X","Description":"bad"}]}"#;
    let outcome: Outcome<u8> = serde_json::from_str(text)?;
    ensure!(outcome.is_failed());
    let fault = outcome
        .into_value()
        .err()
        .ok_or_else(|| anyhow::anyhow!("failed outcome produced a value"))?;
    ensure!(fault.code() == "X");
    Ok(())
}

#[rstest]
fn empty_error_array_synthesises_one_unknown_error() -> Result<()> {
    let outcome: Outcome<u8> = serde_json::from_str(r#"{"IsSuccess":false,"Errors":[]}"#)?;
    ensure!(outcome.errors() == [ErrorInfo::unknown()]);
    Ok(())
}

#[rstest]
fn null_reads_as_no_outcome() -> Result<()> {
    let outcome: Option<Outcome<u8>> = serde_json::from_str("null")?;
    ensure!(outcome.is_none());
    Ok(())
}

#[rstest]
#[case(NamingPolicy::CamelCase)]
#[case(NamingPolicy::SnakeCaseLower)]
#[case(NamingPolicy::SnakeCaseUpper)]
#[case(NamingPolicy::KebabCaseLower)]
#[case(NamingPolicy::KebabCaseUpper)]
fn every_policy_output_reads_back(#[case] policy: NamingPolicy, order: Order) -> Result<()> {
    let codec = JsonCodec::new(JsonOptions::default().with_naming(policy));
    for outcome in inhabitants(order.clone())? {
        let text = codec.to_string(&outcome)?;
        let via_codec = codec.from_str::<Order>(&text)?;
        ensure!(via_codec.as_ref() == Some(&outcome), "{text}");
        let via_serde: Outcome<Order> = serde_json::from_str(&text)?;
        ensure!(via_serde == outcome, "{text}");
    }
    Ok(())
}

#[rstest]
fn dict_naming_hook_output_reads_back(order: Order) -> Result<()> {
    let codec = DictCodec::new(DictOptions::default().with_naming(|name| NamingPolicy::SnakeCaseLower.convert(name)));
    for outcome in inhabitants(order)? {
        let encoded = codec.to_value(&outcome)?;
        ensure!(encoded.find_ref("is_success").is_some(), "{encoded:?}");
        ensure!(codec.from_value::<Order>(encoded)? == Some(outcome));
    }
    Ok(())
}

#[rstest]
fn payload_fields_keep_their_own_names(order: Order) -> Result<()> {
    let codec = JsonCodec::new(JsonOptions::default().with_naming(NamingPolicy::SnakeCaseUpper));
    let encoded = codec.to_value(&Outcome::succeeded(order))?;
    ensure!(encoded == json!({"IS_SUCCESS": true, "VALUE": {"id": 12, "lines": ["tea", "cake"]}}));
    Ok(())
}

#[rstest]
fn payloadless_outcomes_round_trip() -> Result<()> {
    for outcome in [
        Outcome::success(),
        Outcome::failed(ErrorInfo::new("X", "bad")),
        Outcome::cancelled(),
    ] {
        let text = serde_json::to_string(&outcome)?;
        ensure!(serde_json::from_str::<Outcome>(&text)? == outcome, "{text}");
    }
    ensure!(serde_json::to_string(&Outcome::success())? == r#"{"IsSuccess":true}"#);
    Ok(())
}
