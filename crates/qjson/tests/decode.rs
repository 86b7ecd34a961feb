//! Public-API integration tests: every successful decode must parse as JSON
//! with a standard parser and carry the expected value.

use rstest::rstest;
use serde_json::{Value, json};

fn decoded(input: &str) -> (String, Value) {
    let out = qjson::decode(input.as_bytes()).expect("decodes");
    assert!(out.starts_with('{'), "output must be a JSON object: {out}");
    let value: Value = serde_json::from_str(&out).expect("output is valid JSON");
    (out, value)
}

#[rstest]
#[case("a:b", json!({"a": "b"}))]
#[case("{ name: \"Alice\" , age: 30 // comment\n }", json!({"name": "Alice", "age": 30}))]
#[case("x: 0xff | 0b1", json!({"x": 255}))]
#[case("when: 1997-07-16T19:20+01:00", json!({"when": 869_080_800}))]
#[case("t:1w2d3h4m5s", json!({"t": 788_645}))]
#[case("t:1.5h", json!({"t": 5400}))]
#[case("flags: [on, Off, YES]", json!({"flags": [true, false, true]}))]
#[case("empty: {} list: []", json!({"empty": {}, "list": []}))]
#[case("n: null", json!({"n": null}))]
#[case("ratio: 2.75", json!({"ratio": 2.75}))]
fn decodes_to_expected_value(#[case] input: &str, #[case] expected: Value) {
    let (_, value) = decoded(input);
    assert_eq!(value, expected);
}

#[test]
fn empty_input_decodes_to_empty_object() {
    assert_eq!(qjson::decode(b"").unwrap(), "{}");
}

#[test]
fn successful_output_contains_no_comments_or_unquoted_keys() {
    let (out, _) = decoded("a:1 # c\nb:2 // c\nc: /* c */ 3");
    assert!(!out.contains('#'));
    assert!(!out.contains("//"));
    assert!(!out.contains("/*"));
    assert_eq!(out, r#"{"a":1,"b":2,"c":3}"#);
}

#[test]
fn canonical_output_is_idempotent() {
    let inputs = [
        "a: text, b: [1 2 3], c: { d: on }",
        "t: 2h30m",
        "s: 'quoted \"inner\"'",
    ];
    for input in inputs {
        let (out, value) = decoded(input);
        // Feed the standard serialization back through the decoder.
        let reserialized = serde_json::to_string(&value).unwrap();
        let again = qjson::decode(reserialized.as_bytes()).expect("round-trips");
        let value_again: Value = serde_json::from_str(&again).unwrap();
        assert_eq!(value_again, value, "for {input} via {out}");
    }
}

#[test]
fn decode_to_string_renders_diagnostics_flat() {
    let out = qjson::decode_to_string(b"{ a: 1");
    assert!(!out.starts_with('{'));
    assert_eq!(out, "unclosed object at line 1 col 1");

    assert_eq!(qjson::decode_to_string(b"a: 1"), r#"{"a":1}"#);
}

#[test]
fn decode_error_exposes_position_and_kind() {
    let err = qjson::decode(b"a:\n  [1,").unwrap_err();
    assert_eq!(err.kind(), &qjson::ErrorKind::ExpectValueAfterComma);
    assert_eq!((err.line, err.column), (2, 6));
}

#[test]
fn version_shape() {
    let v = qjson::version();
    assert!(v.starts_with("qjson-rs: v"), "{v}");
    assert!(v.contains(" syntax: v"), "{v}");
}
