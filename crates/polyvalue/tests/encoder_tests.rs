/// Encoder contract tests: Value → YAML fragment.
///
/// Exact-output assertions pin the manifest layout downstream consumers rely
/// on; quoting cases live in `quoting_tests.rs`.
use polyvalue::{encode, encode_json, encode_number_or_string, EncodeError, NumberOrString, Value};

fn assert_encode(value: Value, expected: &str) {
    let yaml = encode(&value).unwrap();
    assert_eq!(
        yaml, expected,
        "Encode mismatch:\n  value:    {value:?}\n  got:      {yaml:?}\n  expected: {expected:?}"
    );
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn encode_null() {
    assert_encode(Value::Null, "null\n");
}

#[test]
fn encode_bools() {
    assert_encode(Value::Bool(true), "true\n");
    assert_encode(Value::Bool(false), "false\n");
}

#[test]
fn encode_integers() {
    assert_encode(Value::Int64(42), "42\n");
    assert_encode(Value::Int64(-7), "-7\n");
    assert_encode(Value::Int64(i64::MAX), "9223372036854775807\n");
}

#[test]
fn encode_float_keeps_fraction() {
    assert_encode(Value::Float64(3.25), "3.25\n");
    assert_encode(Value::Float64(0.1), "0.1\n");
}

#[test]
fn encode_whole_float_gets_point_zero() {
    assert_encode(Value::Float64(1.0), "1.0\n");
    assert_encode(Value::Float64(-2.0), "-2.0\n");
}

#[test]
fn encode_float_without_exponent() {
    assert_encode(Value::Float64(1e21), "1000000000000000000000.0\n");
    assert_encode(Value::Float64(1.5e-7), "0.00000015\n");
}

#[test]
fn encode_plain_string() {
    assert_encode(Value::from("hello"), "hello\n");
}

#[test]
fn encode_empty_collections() {
    assert_encode(Value::List(vec![]), "[]\n");
    assert_encode(Value::Map(vec![]), "{}\n");
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn encode_mixed_list() {
    let value = Value::list([
        Value::Int64(1),
        Value::Bool(true),
        Value::map([("name", "x")]),
    ]);
    assert_encode(value, "- 1\n- true\n- name: x\n");
}

#[test]
fn encode_map_keeps_insertion_order() {
    let value = Value::map([("b", 1), ("a", 2), ("c", 3)]);
    assert_encode(value, "b: 1\na: 2\nc: 3\n");
}

#[test]
fn encode_nested_map_indents_two_spaces() {
    let value = Value::map([(
        "spec",
        Value::map([("delay", Value::map([("latency", "10ms")]))]),
    )]);
    assert_encode(value, "spec:\n  delay:\n    latency: 10ms\n");
}

#[test]
fn encode_list_under_key_is_not_indented() {
    let value = Value::map([("ports", Value::list([80, 443]))]);
    assert_encode(value, "ports:\n- 80\n- 443\n");
}

#[test]
fn encode_list_of_maps() {
    let value = Value::map([(
        "containers",
        Value::list([
            Value::map([
                ("name", Value::from("web")),
                ("args", Value::list(["--port", "80"])),
            ]),
            Value::map([("name", "sidecar")]),
        ]),
    )]);
    assert_encode(
        value,
        "containers:\n- name: web\n  args:\n  - \"--port\"\n  - \"80\"\n- name: sidecar\n",
    );
}

#[test]
fn encode_map_nested_in_list_item() {
    let value = Value::list([Value::map([("a", Value::map([("b", 1)]))])]);
    assert_encode(value, "- a:\n    b: 1\n");
}

#[test]
fn encode_list_of_lists() {
    let value = Value::list([Value::list([1, 2]), Value::list([3])]);
    assert_encode(value, "- - 1\n  - 2\n- - 3\n");
}

#[test]
fn encode_empty_children_inline() {
    let value = Value::map([
        ("labels", Value::Map(vec![])),
        ("items", Value::List(vec![])),
        ("unset", Value::Null),
    ]);
    assert_encode(value, "labels: {}\nitems: []\nunset: null\n");
}

#[test]
fn encode_empty_children_in_list() {
    let value = Value::list([Value::Map(vec![]), Value::List(vec![]), Value::Null]);
    assert_encode(value, "- {}\n- []\n- null\n");
}

#[test]
fn encode_long_key_uses_explicit_form() {
    let long = "k".repeat(1025);
    assert_encode(
        Value::map([(long.as_str(), Value::Int64(1))]),
        &format!("? {long}\n: 1\n"),
    );
    assert_encode(
        Value::map([(long.as_str(), Value::map([("a", 1)]))]),
        &format!("? {long}\n:\n  a: 1\n"),
    );
    assert_encode(
        Value::map([(long.as_str(), Value::list([1]))]),
        &format!("? {long}\n:\n  - 1\n"),
    );
    assert_encode(
        Value::list([Value::map([(long.as_str(), 1), ("b", 2)])]),
        &format!("- ? {long}\n  : 1\n  b: 2\n"),
    );
}

#[test]
fn encode_key_at_limit_stays_implicit() {
    let key = "k".repeat(1024);
    assert_encode(Value::map([(key.as_str(), 1)]), &format!("{key}: 1\n"));
}

#[test]
fn encode_no_trailing_spaces() {
    let value = Value::map([
        ("a", Value::list([Value::map([("b", Value::list([1]))])])),
        ("c", Value::map([("d", Value::Map(vec![]))])),
    ]);
    let yaml = encode(&value).unwrap();
    for (i, line) in yaml.lines().enumerate() {
        assert!(!line.ends_with(' '), "line {i} has trailing space: {line:?}");
    }
    assert!(yaml.ends_with('\n'));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn encode_unknown_fails() {
    let err = encode(&Value::Unknown).unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownValue {
            path: "<root>".to_string()
        }
    );
}

#[test]
fn encode_unknown_in_list_fails() {
    let err = encode(&Value::list([Value::Unknown])).unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownValue {
            path: "[0]".to_string()
        }
    );
}

#[test]
fn encode_unknown_fails_every_time() {
    let value = Value::map([("spec", Value::map([("rate", Value::Unknown)]))]);
    for _ in 0..3 {
        assert_eq!(
            encode(&value).unwrap_err(),
            EncodeError::UnknownValue {
                path: "spec.rate".to_string()
            }
        );
    }
}

#[test]
fn encode_unknown_after_valid_siblings_still_fails() {
    let value = Value::list([Value::Int64(1), Value::from("ok"), Value::Unknown]);
    assert!(matches!(
        encode(&value),
        Err(EncodeError::UnknownValue { .. })
    ));
}

#[test]
fn encode_non_finite_float_fails() {
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = encode(&Value::map([("x", f)])).unwrap_err();
        assert!(
            matches!(err, EncodeError::NonFiniteNumber { ref path, .. } if path == "x"),
            "{err:?}"
        );
    }
}

#[test]
fn encode_duplicate_key_fails() {
    let value = Value::Map(vec![
        ("a".into(), Value::Int64(1)),
        ("a".into(), Value::Int64(2)),
    ]);
    assert_eq!(
        encode(&value).unwrap_err(),
        EncodeError::DuplicateKey {
            path: "<root>".to_string(),
            key: "a".to_string()
        }
    );
}

// ============================================================================
// Number-or-string and JSON entry points
// ============================================================================

#[test]
fn encode_number_or_string_values() {
    assert_eq!(
        encode_number_or_string(&NumberOrString::Int64(5)).unwrap(),
        "5\n"
    );
    assert_eq!(
        encode_number_or_string(&NumberOrString::Float64(0.5)).unwrap(),
        "0.5\n"
    );
    assert_eq!(
        encode_number_or_string(&NumberOrString::String("10%".into())).unwrap(),
        "10%\n"
    );
    assert_eq!(
        encode_number_or_string(&NumberOrString::String("10".into())).unwrap(),
        "\"10\"\n"
    );
    assert!(encode_number_or_string(&NumberOrString::Unknown).is_err());
}

#[test]
fn encode_json_text() {
    let yaml = encode_json(r#"{"loss":"10%","ports":[80,443],"ratio":1.0}"#).unwrap();
    assert_eq!(yaml, "loss: 10%\nports:\n- 80\n- 443\nratio: 1.0\n");
}
