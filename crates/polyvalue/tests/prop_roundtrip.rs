/// Property-Based Roundtrip Tests
///
/// Uses the `proptest` crate to generate random value trees and verify that
/// `decode(parse(encode(v))) == v` holds for every generated tree without
/// unknown members. `parse` is `serde_yaml`, an independent YAML reader, so the
/// properties also check that every emitted document is valid YAML.
///
/// Strategies generate:
/// - Random strings (arbitrary unicode plus keyword-like and indicator edge cases)
/// - Random integers over the full `i64` range
/// - Random finite floats, including whole-valued ones
/// - Random booleans and null
/// - Random maps (unique keys, random order) and lists, up to 4 levels deep
use polyvalue::{
    decode, decode_number_or_string, encode, encode_number_or_string, NumberOrString, Value,
    WireValue,
};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating values
// ============================================================================

/// Generate a map key: mostly identifier-like, sometimes awkward.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_./-]{0,15}").unwrap(),
        1 => Just("".to_string()),
        1 => Just("on".to_string()),
        1 => Just("8080".to_string()),
        1 => Just("a: b".to_string()),
        1 => Just("- x".to_string()),
    ]
}

/// Generate a string value with edge cases.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary unicode, including control characters
        3 => any::<String>(),
        // Quantity-like tokens
        2 => prop::string::string_regex("[0-9]{1,4}(%|m|Mi|Gi|ms|s)?").unwrap(),
        // Strings built from YAML indicator characters
        2 => prop::string::string_regex("[a-z0-9:#,\\[\\]{}&*!|>'\"%@`?\\- ]{0,12}").unwrap(),
        // Keyword-like strings
        1 => prop_oneof![
            Just("true".to_string()),
            Just("yes".to_string()),
            Just("Off".to_string()),
            Just("null".to_string()),
            Just("~".to_string()),
            Just("0644".to_string()),
            Just("0x1F".to_string()),
            Just("1e3".to_string()),
            Just(".inf".to_string()),
            Just("1:30".to_string()),
            Just("2001-12-14".to_string()),
            Just("---".to_string()),
        ],
    ]
}

/// Generate a finite float.
fn arb_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("wire numbers are finite", |f| f.is_finite()),
        (-1_000_000i64..1_000_000i64).prop_map(|i| i as f64),
    ]
}

/// Generate a leaf value.
fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int64),
        arb_float().prop_map(Value::Float64),
        arb_string().prop_map(Value::String),
    ]
}

/// Generate a value tree up to 4 levels deep. Maps are built through
/// `Value::map`, which keeps keys unique.
fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(Value::map),
        ]
    })
}

/// Generate a number-or-string value without unknowns.
fn arb_number_or_string() -> impl Strategy<Value = NumberOrString> {
    prop_oneof![
        Just(NumberOrString::Null),
        any::<i64>().prop_map(NumberOrString::Int64),
        arb_float().prop_map(NumberOrString::Float64),
        arb_string().prop_map(NumberOrString::String),
    ]
}

fn parse(yaml: &str) -> WireValue {
    WireValue::from_yaml_str(yaml).unwrap_or_else(|e| panic!("invalid YAML emitted: {e}\n{yaml}"))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Core roundtrip property: decode(parse(encode(v))) == v.
    #[test]
    fn roundtrip_preserves_value(value in arb_value()) {
        let yaml = encode(&value).unwrap();
        let back = decode(&parse(&yaml)).unwrap();
        prop_assert_eq!(
            &value,
            &back,
            "Roundtrip failed!\n  value: {:?}\n  YAML:\n{}",
            value,
            yaml
        );
    }

    /// Number-or-string values keep their variant and exact string token.
    #[test]
    fn roundtrip_number_or_string(value in arb_number_or_string()) {
        let yaml = encode_number_or_string(&value).unwrap();
        let back = decode_number_or_string(&parse(&yaml)).unwrap();
        prop_assert_eq!(value, back, "YAML: {:?}", yaml);
    }

    /// Any string survives as a map value.
    #[test]
    fn string_value_roundtrip(s in arb_string()) {
        let value = Value::map([("key", s.clone())]);
        let yaml = encode(&value).unwrap();
        let back = decode(&parse(&yaml)).unwrap();
        prop_assert_eq!(back.get("key"), Some(&Value::String(s)));
    }

    /// Encoding is deterministic.
    #[test]
    fn encode_is_deterministic(value in arb_value()) {
        prop_assert_eq!(encode(&value).unwrap(), encode(&value).unwrap());
    }

    /// Output always ends with a newline and never has trailing spaces.
    #[test]
    fn no_trailing_spaces(value in arb_value()) {
        let yaml = encode(&value).unwrap();
        prop_assert!(yaml.ends_with('\n'));
        for (i, line) in yaml.lines().enumerate() {
            prop_assert!(
                !line.ends_with(' '),
                "Line {} has trailing space: {:?}",
                i,
                line
            );
        }
    }

    /// Wrapping any tree in a list with an unknown sibling makes encoding fail.
    #[test]
    fn unknown_anywhere_fails(value in arb_value(), at_front in any::<bool>()) {
        let items = if at_front {
            vec![Value::Unknown, value]
        } else {
            vec![value, Value::Unknown]
        };
        prop_assert!(encode(&Value::List(items)).is_err());
    }

    /// Converting to wire and decoding again is the identity.
    #[test]
    fn wire_conversion_is_lossless(value in arb_value()) {
        let wire = value.to_wire().unwrap();
        prop_assert_eq!(decode(&wire).unwrap(), value);
    }
}
