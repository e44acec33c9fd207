//! Encoder — converts value trees into YAML manifest fragments.
//!
//! Output is block-style YAML in the layout Kubernetes tooling emits:
//!
//! - **Mappings**: `key: value` per line, nested mappings indented two spaces
//! - **Sequences**: `- item` per line, not indented under their parent key
//! - **Compact nesting**: a mapping or sequence inside a sequence item starts on
//!   the `- ` line (`- name: x`, `- - 1`)
//! - **Empty collections**: flow style `{}` / `[]`
//! - **Long keys**: keys over 1024 bytes use the explicit `? key` / `: value` form
//! - **Order**: list and map order is written exactly as held, never sorted
//!
//! Scalars are written so that any YAML 1.1 or 1.2 parser reads back the same
//! kind: integers without fraction or exponent, floats always with a `.`, and
//! strings plain only when nothing could mistake them for null, a boolean or a
//! number. Everything else is double-quoted.
//!
//! # Example
//! ```
//! use polyvalue::{encode, Value};
//! let value = Value::list([
//!     Value::Int64(1),
//!     Value::Bool(true),
//!     Value::map([("name", "x")]),
//! ]);
//! assert_eq!(encode(&value).unwrap(), "- 1\n- true\n- name: x\n");
//! ```

use crate::decoder::decode_json;
use crate::error::{EncodeError, Result};
use crate::number::NumberOrString;
use crate::path::AttrPath;
use crate::value::Value;
use std::collections::HashSet;

/// Encode a value tree as a YAML document fragment.
///
/// Fails with [`EncodeError::UnknownValue`] if any node is still unknown; no
/// partial output is produced.
pub fn encode(value: &Value) -> std::result::Result<String, EncodeError> {
    let mut out = String::new();
    let mut path = AttrPath::new();
    if let Err(err) = encode_root(value, &mut path, &mut out) {
        tracing::debug!(error = %err, "refused to encode value");
        return Err(err);
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(
            nodes = value.node_count(),
            bytes = out.len(),
            "encoded dynamic value"
        );
    }
    Ok(out)
}

/// Encode a number-or-string value.
///
/// String tokens go through the same quoting rule as any other string, so
/// `"10%"` stays a string and `"10"` is quoted to stay one.
pub fn encode_number_or_string(
    value: &NumberOrString,
) -> std::result::Result<String, EncodeError> {
    encode(&Value::from(value.clone()))
}

/// Parse JSON text, decode it and encode the result as YAML.
pub fn encode_json(json: &str) -> Result<String> {
    let value = decode_json(json)?;
    Ok(encode(&value)?)
}

/// Top-level dispatch: non-empty collections emit block syntax, everything
/// else a single scalar line.
fn encode_root(
    value: &Value,
    path: &mut AttrPath,
    out: &mut String,
) -> std::result::Result<(), EncodeError> {
    match value {
        Value::Map(entries) if !entries.is_empty() => {
            encode_map_entries(entries, 0, false, path, out)
        }
        Value::List(items) if !items.is_empty() => encode_list_items(items, 0, false, path, out),
        _ => {
            encode_inline(value, path, out)?;
            out.push('\n');
            Ok(())
        }
    }
}

/// Longest key, in bytes as written, that may stay an implicit `key:` key.
/// Parsers stop looking for the `:` of an implicit key after 1024 positions.
const MAX_IMPLICIT_KEY_LEN: usize = 1024;

/// Emit mapping entries at `indent`. With `continues_line` set, the first
/// entry follows a `- ` marker already written on the current line.
fn encode_map_entries(
    entries: &[(String, Value)],
    indent: usize,
    continues_line: bool,
    path: &mut AttrPath,
    out: &mut String,
) -> std::result::Result<(), EncodeError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (i, (key, value)) in entries.iter().enumerate() {
        if !seen.insert(key.as_str()) {
            return Err(EncodeError::DuplicateKey {
                path: path.to_string(),
                key: key.clone(),
            });
        }
        if i > 0 || !continues_line {
            push_indent(indent, out);
        }
        let mut rendered = String::new();
        encode_string(key, &mut rendered);
        let explicit = rendered.len() > MAX_IMPLICIT_KEY_LEN;
        if explicit {
            out.push_str("? ");
            out.push_str(&rendered);
            out.push('\n');
            push_indent(indent, out);
        } else {
            out.push_str(&rendered);
        }
        out.push(':');
        path.push_key(key);
        match value {
            Value::Map(child) if !child.is_empty() => {
                out.push('\n');
                encode_map_entries(child, indent + 2, false, path, out)?;
            }
            Value::List(child) if !child.is_empty() => {
                // Sequences sit at the key's own indentation, except under an
                // explicit `:` where they nest one level
                out.push('\n');
                let seq_indent = if explicit { indent + 2 } else { indent };
                encode_list_items(child, seq_indent, false, path, out)?;
            }
            _ => {
                out.push(' ');
                encode_inline(value, path, out)?;
                out.push('\n');
            }
        }
        path.pop();
    }
    Ok(())
}

/// Emit sequence items at `indent`, each behind a `- ` marker.
fn encode_list_items(
    items: &[Value],
    indent: usize,
    continues_line: bool,
    path: &mut AttrPath,
    out: &mut String,
) -> std::result::Result<(), EncodeError> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !continues_line {
            push_indent(indent, out);
        }
        out.push_str("- ");
        path.push_index(i);
        match item {
            Value::Map(child) if !child.is_empty() => {
                encode_map_entries(child, indent + 2, true, path, out)?;
            }
            Value::List(child) if !child.is_empty() => {
                encode_list_items(child, indent + 2, true, path, out)?;
            }
            _ => {
                encode_inline(item, path, out)?;
                out.push('\n');
            }
        }
        path.pop();
    }
    Ok(())
}

/// Emit a scalar or an empty collection on the current line.
/// Non-empty collections never reach here; the block writers handle them.
fn encode_inline(
    value: &Value,
    path: &AttrPath,
    out: &mut String,
) -> std::result::Result<(), EncodeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Unknown => {
            return Err(EncodeError::UnknownValue {
                path: path.to_string(),
            })
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int64(i) => out.push_str(&i.to_string()),
        Value::Float64(f) => out.push_str(&format_float(*f, path)?),
        Value::String(s) => encode_string(s, out),
        Value::List(_) => out.push_str("[]"),
        Value::Map(_) => out.push_str("{}"),
    }
    Ok(())
}

/// Format a float so it reads back as the same `f64`, and as a float.
///
/// `Display` gives the shortest exact representation without an exponent;
/// whole numbers get a `.0` so a parser does not resolve them as integers.
fn format_float(f: f64, path: &AttrPath) -> std::result::Result<String, EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::NonFiniteNumber {
            path: path.to_string(),
            value: f,
        });
    }
    let s = f.to_string();
    if s.contains('.') {
        Ok(s)
    } else {
        Ok(format!("{s}.0"))
    }
}

/// Emit a string (value or key), quoting only when a plain scalar would be
/// misread or would not parse.
fn encode_string(s: &str, out: &mut String) {
    if !needs_quoting(s) {
        out.push_str(s);
        return;
    }
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Characters that cannot start a plain scalar.
const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// Determine if a string must be double-quoted to read back as the same string.
///
/// A string MUST be quoted if it:
/// - Is empty, or has leading/trailing whitespace
/// - Contains control characters, line separators or a BOM
/// - Resolves to null, a boolean or a number under YAML 1.1 or 1.2
///   (`~`, `yes`, `off`, `0644`, `1e3`, `0x1F`, `1:30`, `.inf`, ...)
/// - Starts with an indicator character or a document marker
/// - Contains `": "` or `" #"`, or ends with `:`
fn needs_quoting(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }
    if s.chars().any(needs_escape) {
        return true;
    }
    if resolves_to_non_string(s) {
        return true;
    }
    if s.starts_with(INDICATORS) || s.starts_with("...") {
        return true;
    }
    s.contains(": ") || s.contains(" #") || s.ends_with(':')
}

/// Non-printable characters and line breaks, written as escapes when quoted.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{FEFF}' | '\u{2028}' | '\u{2029}' | '\u{FFFE}' | '\u{FFFF}')
}

/// True if an untagged plain scalar with this text would not resolve to a string.
fn resolves_to_non_string(s: &str) -> bool {
    is_null_token(s)
        || is_bool_token(s)
        || looks_numeric(s)
        || looks_like_timestamp(s)
        || matches!(s, "<<" | "=")
}

fn is_null_token(s: &str) -> bool {
    matches!(s, "~" | "null" | "Null" | "NULL")
}

/// YAML 1.1 booleans, a superset of the 1.2 core `true`/`false`.
fn is_bool_token(s: &str) -> bool {
    matches!(
        s,
        "y" | "Y"
            | "yes"
            | "Yes"
            | "YES"
            | "n"
            | "N"
            | "no"
            | "No"
            | "NO"
            | "true"
            | "True"
            | "TRUE"
            | "false"
            | "False"
            | "FALSE"
            | "on"
            | "On"
            | "ON"
            | "off"
            | "Off"
            | "OFF"
    )
}

/// Check if a string looks like any YAML integer or float form: decimal,
/// leading-zero, underscore-grouped, exponent, hex/octal/binary, base 60,
/// or the special `.inf` / `.nan` spellings.
fn looks_numeric(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.is_empty() {
        return false;
    }
    let lower = unsigned.to_ascii_lowercase();
    if lower == ".inf" || lower == ".nan" {
        return true;
    }
    if let Some(digits) = lower.strip_prefix("0x") {
        return is_digit_run(digits, |c| c.is_ascii_hexdigit());
    }
    if let Some(digits) = lower.strip_prefix("0o") {
        return is_digit_run(digits, |c| ('0'..='7').contains(&c));
    }
    if let Some(digits) = lower.strip_prefix("0b") {
        return is_digit_run(digits, |c| c == '0' || c == '1');
    }
    if unsigned.contains(':') {
        return is_sexagesimal(unsigned);
    }
    is_decimal(unsigned)
}

/// At least one digit, nothing but digits and `_` group separators.
fn is_digit_run(s: &str, is_digit: impl Fn(char) -> bool) -> bool {
    s.chars().any(&is_digit) && s.chars().all(|c| c == '_' || is_digit(c))
}

/// `1`, `007`, `1_000`, `3.`, `.5`, `2.5e-3`, `1E10`
fn is_decimal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let grouped = |part: &str| part.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !grouped(whole) || !grouped(fraction) || !mantissa.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// YAML 1.1 base 60: `190:20:30`, `1:30.5`
fn is_sexagesimal(s: &str) -> bool {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if !fraction.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return false;
    }
    let mut parts = whole.split(':');
    let head = parts.next().unwrap_or_default();
    if !head.starts_with(|c: char| c.is_ascii_digit()) || !is_digit_run(head, |c| c.is_ascii_digit())
    {
        return false;
    }
    parts.all(|part| (1..=2).contains(&part.len()) && part.chars().all(|c| c.is_ascii_digit()))
}

/// YAML 1.1 timestamps start with a `YYYY-M-D` date.
fn looks_like_timestamp(s: &str) -> bool {
    let mut parts = s.splitn(3, '-');
    let (Some(year), Some(month), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let day: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && (1..=2).contains(&month.len())
        && month.chars().all(|c| c.is_ascii_digit())
        && (1..=2).contains(&day.len())
}

/// Generate `depth` spaces of indentation.
fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push(' ');
    }
}
