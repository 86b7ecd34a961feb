use alloc::string::{String, ToString};

use super::fail;

#[test]
fn unclosed_object_reports_the_opening_brace() {
    assert_eq!(fail("{ a: 1"), "unclosed object at line 1 col 1");
    assert_eq!(fail("x: { a: 1"), "unclosed object at line 1 col 4");
    assert_eq!(fail("{a"), "unclosed object at line 1 col 1");
    assert_eq!(fail("{a:"), "unclosed object at line 1 col 1");
}

#[test]
fn unclosed_array_reports_the_opening_bracket() {
    assert_eq!(fail("a: [1, 2"), "unclosed array at line 1 col 4");
    assert_eq!(fail("a: ["), "unclosed array at line 1 col 4");
}

#[test]
fn unexpected_closers_in_value_position() {
    assert_eq!(fail("a: }"), "unexpected close brace at line 1 col 4");
    assert_eq!(fail("a: ]"), "unexpected close square bracket at line 1 col 4");
}

#[test]
fn missing_colon() {
    assert_eq!(fail("{a}"), "expect colon at line 1 col 3");
    assert_eq!(fail("a"), "expect colon at line 1 col 2");
    assert_eq!(fail("a 1"), "expect colon at line 1 col 4");
}

#[test]
fn identifiers_must_be_strings() {
    assert_eq!(fail("{[]: 1}"), "expect string identifier at line 1 col 2");
    assert_eq!(fail("]"), "expect string identifier at line 1 col 1");
}

#[test]
fn dangling_commas() {
    assert_eq!(
        fail("{a:1,}"),
        "expect identifier after comma at line 1 col 6"
    );
    assert_eq!(fail("a:1,"), "expect identifier after comma at line 1 col 5");
    assert_eq!(fail("a: [1,]"), "expect value after comma at line 1 col 7");
    assert_eq!(fail("a: [1,"), "expect value after comma at line 1 col 7");
}

#[test]
fn trailing_tokens_after_the_document() {
    assert_eq!(fail("{a:1} x"), "syntax error at line 1 col 7");
    assert_eq!(fail("{a:1} }"), "syntax error at line 1 col 7");
    assert_eq!(fail("a:1 }"), "syntax error at line 1 col 5");
}

#[test]
fn same_line_members_need_a_delimiter() {
    // Whitespace does not end a quoteless string, so the value becomes
    // `1 b` and fails in the numeric engine.
    assert_eq!(
        fail("a:1 b:2"),
        "invalid numeric expression at line 1 col 5"
    );
}

#[test]
fn value_missing_at_end_of_bare_input() {
    assert_eq!(fail("a:"), "syntax error at line 1 col 3");
}

#[test]
fn depth_limit() {
    let mut input = String::from("a:");
    for _ in 0..201 {
        input.push('[');
    }
    for _ in 0..201 {
        input.push(']');
    }
    assert_eq!(
        fail(&input),
        "max object or array depth exceeded at line 1 col 203"
    );
}

#[test]
fn control_bytes_are_invalid_outside_multilines() {
    assert_eq!(fail("a: \u{1}"), "invalid character at line 1 col 4");
    assert_eq!(fail("a\rb"), "invalid character at line 1 col 2");
}

#[test]
fn invalid_utf8() {
    let err = crate::decode(b"a: \xFF").unwrap_err();
    assert_eq!(err.to_string(), "invalid character at line 1 col 4");
    let err = crate::decode(b"a: \xE2\x82").unwrap_err();
    assert_eq!(err.to_string(), "truncated character at line 1 col 4");
}

#[test]
fn unclosed_strings() {
    assert_eq!(fail("a: \"x"), "unclosed double quote string at line 1 col 4");
    assert_eq!(fail("a: 'x"), "unclosed single quote string at line 1 col 4");
}

#[test]
fn newlines_in_quoted_strings() {
    assert_eq!(
        fail("a: \"x\ny\""),
        "newline in double quote string at line 1 col 6"
    );
    assert_eq!(
        fail("a: 'x\r\ny'"),
        "newline in single quote string at line 1 col 6"
    );
}

#[test]
fn unclosed_block_comment() {
    assert_eq!(fail("/* x"), "unclosed slash star comment at line 1 col 1");
    assert_eq!(
        fail("a: 1 /* trailing"),
        "unclosed slash star comment at line 1 col 6"
    );
}

#[test]
fn invalid_escape_sequence_points_at_the_backslash() {
    assert_eq!(fail("a: \"a\\qb\""), "invalid escape sequence at line 1 col 6");
    assert_eq!(fail("a: \"\\u12G4\""), "invalid escape sequence at line 1 col 5");
}

#[test]
fn positions_count_code_points_not_bytes() {
    // Two-byte é occupies one column.
    assert_eq!(fail("é: \u{1}"), "invalid character at line 1 col 4");
}

#[test]
fn positions_use_the_line_of_the_error() {
    assert_eq!(fail("a: 1\nb: }"), "unexpected close brace at line 2 col 4");
    assert_eq!(fail("\n\n  {x"), "unclosed object at line 3 col 3");
}

#[test]
fn error_positions_are_stable_under_appended_input() {
    let before = fail("a: \u{1}");
    let after = fail("a: \u{1} trailing garbage [,,,");
    assert_eq!(before, after);
}
