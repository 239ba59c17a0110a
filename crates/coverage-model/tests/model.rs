//! Tests for coverage-model types.

use coverage_model::{
    ContractId, CoverageRecord, CoverageRequest, CoverageTypeId, ModelError, RejectionRule,
    parse_amount,
};
use rust_decimal_macros::dec;

#[test]
fn ids_parse_with_surrounding_whitespace() {
    assert_eq!(" 100 ".parse::<ContractId>(), Ok(ContractId::new(100)));
    assert_eq!("7".parse::<CoverageTypeId>(), Ok(CoverageTypeId::new(7)));
}

#[test]
fn ids_reject_non_numeric_text() {
    assert_eq!(
        "abc".parse::<ContractId>(),
        Err(ModelError::InvalidContractId("abc".to_string()))
    );
    assert_eq!(
        "7.5".parse::<CoverageTypeId>(),
        Err(ModelError::InvalidCoverageTypeId("7.5".to_string()))
    );
}

#[test]
fn amount_keeps_scale() {
    let amount = parse_amount("10000.00").expect("parse amount");
    assert_eq!(amount, dec!(10000));
    assert_eq!(amount.to_string(), "10000.00");
}

#[test]
fn amount_rejects_garbage() {
    assert_eq!(
        parse_amount("ten thousand"),
        Err(ModelError::InvalidAmount("ten thousand".to_string()))
    );
}

#[test]
fn record_from_request_copies_values() {
    let request = CoverageRequest::new(
        ContractId::new(100),
        CoverageTypeId::new(7),
        dec!(10000.00),
    );
    let record = CoverageRecord::from(request);
    assert_eq!(record.contract_id, ContractId::new(100));
    assert_eq!(record.coverage_type_id, CoverageTypeId::new(7));
    assert_eq!(record.amount, dec!(10000.00));
    assert_eq!(
        request.to_string(),
        "contract 100 / coverage type 7 / amount 10000.00"
    );
}

#[test]
fn record_serializes_ids_transparently() {
    let record = CoverageRecord::from(CoverageRequest::new(
        ContractId::new(100),
        CoverageTypeId::new(7),
        dec!(250.50),
    ));
    let json = serde_json::to_value(record).expect("serialize record");
    assert_eq!(json["contract_id"], 100);
    assert_eq!(json["coverage_type_id"], 7);
    assert_eq!(json["amount"], "250.50");
}

#[test]
fn rule_texts_default_to_blank() {
    let rule = RejectionRule {
        sequence: 1,
        age_rule: None,
        amount_rule: Some(">=5000".to_string()),
    };
    assert_eq!(rule.age_text(), "");
    assert_eq!(rule.amount_text(), ">=5000");
}
