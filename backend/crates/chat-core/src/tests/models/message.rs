use crate::Message;

use chrono::Utc;
use googletest::prelude::*;

#[test]
fn given_sender_and_text_when_formatted_then_colon_separated() {
    assert_that!(Message::format_line("bob", "hello alice"), eq("bob: hello alice"));
}

#[test]
fn given_message_when_line_then_matches_format_line() {
    let message = Message {
        sequence: 1,
        sender_id: "alice".to_string(),
        text: "hi".to_string(),
        timestamp: Utc::now(),
    };

    assert_that!(message.line(), eq("alice: hi"));
}
