use hashlist::error::{exit_codes, Error};
use serde_json::Value;

#[test]
fn exit_code_user_error() {
    let err = Error::InvalidArgument("bad input".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

    let err = Error::Parse("bitmask 'x' is not a non-negative integer".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

    let err = Error::InvalidGestureState("no active drag".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::OperationFailed("boom".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn parse_errors_carry_reason_details() {
    let err = Error::Parse("missing bitmask key 's'".to_string());
    let details = err.details().expect("details");
    assert_eq!(
        details["reason"],
        Value::String("missing bitmask key 's'".to_string())
    );
    assert!(Error::InvalidArgument("x".to_string()).details().is_none());
}
