//! Tests for the domain error payload and its serde round-trip.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::invalid_transition("frozen"), ErrorCode::InvalidTransition)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::timeout("slow"), ErrorCode::Timeout)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn details_and_trace_id_attach() {
    let err = Error::conflict("overlapping reservation")
        .with_details(json!({ "venueId": "v" }))
        .with_trace_id("abc123");
    assert_eq!(err.details(), Some(&json!({ "venueId": "v" })));
    assert_eq!(err.trace_id(), Some("abc123"));
}

#[rstest]
fn only_timeout_is_transient() {
    assert!(Error::timeout("lock wait expired").is_transient());
    assert!(!Error::conflict("duplicate").is_transient());
    assert!(!Error::internal("boom").is_transient());
}

#[rstest]
fn serde_round_trip_preserves_fields() {
    let original = Error::not_found("no such venue")
        .with_trace_id("3d1c1f6a40e14c8f9d7a2b5c8e4f1a23")
        .with_details(json!({ "venueId": "00000000-0000-0000-0000-000000000001" }));
    let encoded = serde_json::to_string(&original).unwrap();
    let decoded: Error = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, original);
}

#[rstest]
fn serde_accepts_snake_case_trace_alias() {
    let decoded: Error = serde_json::from_str(
        r#"{"code":"timeout","message":"lock wait expired","trace_id":"abc"}"#,
    )
    .unwrap();
    assert_eq!(decoded.trace_id(), Some("abc"));
}

#[rstest]
fn dto_conversion_rejects_blank_trace_id() {
    let result: Result<Error, _> =
        serde_json::from_str(r#"{"code":"not_found","message":"gone","traceId":"   "}"#);
    assert!(result.is_err());
}

#[rstest]
fn error_code_serialises_as_snake_case() {
    let encoded = serde_json::to_string(&ErrorCode::InvalidTransition).unwrap();
    assert_eq!(encoded, r#""invalid_transition""#);
}
