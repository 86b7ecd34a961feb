use super::{fail, ok};

#[test]
fn basic_multiline() {
    let input = "text:\n  ` \\n\n  hello\n  `";
    assert_eq!(ok(input), r#"{"text":"hello"}"#);
}

#[test]
fn interior_newlines_use_the_specifier() {
    let input = "text:\n  ` \\n\n  a\n  b\n  `";
    assert_eq!(ok(input), r#"{"text":"a\nb"}"#);

    let crlf = "text:\n  ` \\r\\n\n  a\n  b\n  `";
    assert_eq!(ok(crlf), r#"{"text":"a\r\nb"}"#);
}

#[test]
fn source_line_endings_do_not_matter() {
    // CRLF in the source still emits the specifier's escape.
    let input = "text:\n  ` \\n\r\n  a\r\n  b\r\n  `";
    assert_eq!(ok(input), r#"{"text":"a\nb"}"#);
}

#[test]
fn empty_content() {
    assert_eq!(ok("text:\n ` \\n\n `"), r#"{"text":""}"#);
}

#[test]
fn empty_margin() {
    assert_eq!(ok("text:\n` \\n\nhi\n`"), r#"{"text":"hi"}"#);
}

#[test]
fn closing_backtick_can_end_a_content_line() {
    assert_eq!(ok("text:\n ` \\n\n hi`"), r#"{"text":"hi"}"#);
}

#[test]
fn blank_lines_keep_the_margin() {
    let input = "text:\n  ` \\n\n  a\n  \n  b\n  `";
    assert_eq!(ok(input), r#"{"text":"a\n\nb"}"#);
}

#[test]
fn escaped_backtick_is_content() {
    assert_eq!(ok("text:\n ` \\n\n x`\\z\n `"), r#"{"text":"x`z"}"#);
}

#[test]
fn json_metacharacters_are_escaped() {
    assert_eq!(ok("text:\n ` \\n\n a\"b\\c\n `"), r#"{"text":"a\"b\\c"}"#);
    assert_eq!(ok("text:\n ` \\n\n a\tb\n `"), r#"{"text":"a\tb"}"#);
    assert_eq!(ok("text:\n ` \\n\n a</b\n `"), r#"{"text":"a<\/b"}"#);
}

#[test]
fn control_bytes_are_escaped_not_rejected() {
    assert_eq!(ok("text:\n ` \\n\n a\u{8}b\u{c}c\u{1}d\n `"), r#"{"text":"a\bb\fc\u0001d"}"#);
}

#[test]
fn comment_may_follow_the_specifier() {
    assert_eq!(ok("text:\n ` \\n # note\n hi\n `"), r#"{"text":"hi"}"#);
    assert_eq!(ok("text:\n ` \\n // note\n hi\n `"), r#"{"text":"hi"}"#);
}

#[test]
fn multiline_inside_an_array() {
    assert_eq!(ok("x: [\n ` \\n\n a\n `\n 1]"), r#"{"x":["a",1]}"#);
}

#[test]
fn margin_must_be_whitespace_only() {
    assert_eq!(
        fail("text: ` \\n\n hi\n `"),
        "margin must be whitespace only at line 1 col 1"
    );
}

#[test]
fn margin_mismatch_points_at_the_bad_byte() {
    assert_eq!(
        fail("text:\n  ` \\n\n x\n  `"),
        "invalid margin character at line 3 col 2"
    );
}

#[test]
fn specifier_diagnostics() {
    assert_eq!(
        fail("text:\n ` x"),
        "missing newline specifier at line 2 col 4"
    );
    assert_eq!(
        fail("text:\n ` \\t\n x\n `"),
        "invalid newline specifier at line 2 col 4"
    );
    assert_eq!(
        fail("text:\n ` \\n x\n `"),
        "invalid multiline start at line 2 col 7"
    );
}

#[test]
fn unclosed_multiline_reports_the_opening_backtick() {
    assert_eq!(
        fail("text:\n ` \\n\n hi"),
        "unclosed multiline string at line 2 col 2"
    );
    assert_eq!(
        fail("text:\n ` \\n"),
        "unclosed multiline string at line 2 col 2"
    );
}

#[test]
fn multiline_cannot_be_an_identifier() {
    assert_eq!(
        fail("`\\n\nx\n`: 1"),
        "expect string identifier at line 1 col 1"
    );
}
