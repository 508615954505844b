use crate::{ApiError, ChatQuery};

use chat_core::MAX_CLIENT_ID_LENGTH;

use googletest::prelude::*;

fn query(id: Option<&str>, message: Option<&str>) -> ChatQuery {
    ChatQuery {
        id: id.map(str::to_string),
        message: message.map(str::to_string),
    }
}

#[test]
fn given_id_when_parsed_then_client_id() {
    let client_id = query(Some("alice"), None).client_id().unwrap();

    assert_that!(client_id.as_str(), eq("alice"));
}

#[test]
fn given_missing_id_when_parsed_then_bad_request_on_id() {
    let result = query(None, None).client_id();

    assert!(matches!(
        result,
        Err(ApiError::BadRequest { field: Some(ref f), .. }) if f == "id"
    ));
}

#[test]
fn given_empty_id_when_parsed_then_bad_request() {
    let result = query(Some(""), None).client_id();

    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}

#[test]
fn given_oversized_id_when_parsed_then_bad_request() {
    let long = "x".repeat(MAX_CLIENT_ID_LENGTH + 1);

    let result = query(Some(&long), None).client_id();

    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}

#[test]
fn given_message_when_read_then_returned_verbatim() {
    let q = query(Some("alice"), Some("  hi there  "));

    assert_that!(q.message().unwrap(), eq("  hi there  "));
}

#[test]
fn given_empty_or_missing_message_when_read_then_bad_request_on_message() {
    for q in [query(Some("alice"), Some("")), query(Some("alice"), None)] {
        let result = q.message();
        assert!(matches!(
            result,
            Err(ApiError::BadRequest { field: Some(ref f), .. }) if f == "message"
        ));
    }
}
