use crate::{ClientId, CoreError, MAX_CLIENT_ID_LENGTH};

use googletest::prelude::*;

#[test]
fn given_plain_token_when_parsed_then_value_is_kept_verbatim() {
    let id = ClientId::parse("alice").unwrap();

    assert_that!(id.as_str(), eq("alice"));
    assert_that!(id.to_string(), eq("alice"));
}

#[test]
fn given_empty_token_when_parsed_then_validation_error() {
    let result = ClientId::parse("");

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_whitespace_token_when_parsed_then_validation_error() {
    let result = ClientId::parse("   ");

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_oversized_token_when_parsed_then_validation_error() {
    let token = "x".repeat(MAX_CLIENT_ID_LENGTH + 1);

    let result = ClientId::parse(&token);

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_token_at_limit_when_parsed_then_ok() {
    let token = "x".repeat(MAX_CLIENT_ID_LENGTH);

    assert_that!(ClientId::parse(&token), ok(anything()));
}
