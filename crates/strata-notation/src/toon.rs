//! TOON (token-oriented object notation) encoding.
//!
//! TOON is an indentation-based notation that trims the punctuation JSON spends on repeated
//! keys and quotes:
//!
//! ```text
//! metadata:
//!   title: guide
//!   tags[2]: ops,kubernetes
//! keywords[2]{text,confidence_level}:
//!   Tokio,high
//!   async,medium
//! sections[1]:
//!   - id: section_0
//!     title: Guide
//! ```
//!
//! - Objects are `key: value` lines; nested objects are indented two spaces.
//! - Arrays of primitives are inline: `key[N]: a,b,c`.
//! - Arrays of objects sharing the same keys, holding only primitives, become a table:
//!   `key[N]{f1,f2}:` followed by one row per element.
//! - Any other array is a `key[N]:` header followed by `- ` list items.
//!
//! Only encoding is supported.

use serde_json::{Map, Value};

/// Indentation per nesting level.
const INDENT: &str = "  ";

/// Value delimiter inside inline arrays and table rows.
const DELIMITER: char = ',';

/// Encodes a JSON value as TOON. The output has no trailing newline.
pub fn encode(value: &Value) -> String {
    let mut encoder = Encoder::default();
    match value {
        Value::Object(map) => encoder.object_fields(map, 0),
        Value::Array(items) => encoder.array(None, items, 0, ""),
        primitive => encoder.lines.push(scalar(primitive)),
    }
    encoder.lines.join("\n")
}

/// Accumulates output lines.
#[derive(Default)]
struct Encoder {
    /// Finished lines.
    lines: Vec<String>,
}

impl Encoder {
    /// Writes every field of `map` at `depth`.
    fn object_fields(&mut self, map: &Map<String, Value>, depth: usize) {
        for (key, value) in map {
            self.field(key, value, depth, &indent(depth));
        }
    }

    /// Writes one `key: value` field; `lead` is the text before the key.
    fn field(&mut self, key: &str, value: &Value, depth: usize, lead: &str) {
        let key = encode_key(key);
        match value {
            Value::Object(map) => {
                self.lines.push(format!("{lead}{key}:"));
                self.object_fields(map, depth + 1);
            }
            Value::Array(items) => self.array(Some(&key), items, depth, lead),
            primitive => self.lines.push(format!("{lead}{key}: {}", scalar(primitive))),
        }
    }

    /// Writes an array header and body; `key` is `None` for bare arrays.
    fn array(&mut self, key: Option<&str>, items: &[Value], depth: usize, lead: &str) {
        let key = key.unwrap_or_default();
        let len = items.len();

        if items.iter().all(is_primitive) {
            let values = join_scalars(items.iter());
            if values.is_empty() {
                self.lines.push(format!("{lead}{key}[{len}]:"));
            } else {
                self.lines.push(format!("{lead}{key}[{len}]: {values}"));
            }
            return;
        }

        if let Some(fields) = table_fields(items) {
            let header = fields.iter().map(|f| encode_key(f)).collect::<Vec<_>>().join(",");
            self.lines.push(format!("{lead}{key}[{len}]{{{header}}}:"));
            let row_indent = indent(depth + 1);
            for item in items {
                if let Value::Object(map) = item {
                    let row = join_scalars(fields.iter().filter_map(|f| map.get(*f)));
                    self.lines.push(format!("{row_indent}{row}"));
                }
            }
            return;
        }

        self.lines.push(format!("{lead}{key}[{len}]:"));
        for item in items {
            self.list_item(item, depth + 1);
        }
    }

    /// Writes one `- ` list item at `depth`.
    fn list_item(&mut self, item: &Value, depth: usize) {
        let lead = format!("{}- ", indent(depth));
        match item {
            Value::Object(map) if map.is_empty() => self.lines.push(format!("{}-", indent(depth))),
            Value::Object(map) => {
                let mut fields = map.iter();
                if let Some((key, value)) = fields.next() {
                    self.field(key, value, depth + 1, &lead);
                }
                let rest = indent(depth + 1);
                for (key, value) in fields {
                    self.field(key, value, depth + 1, &rest);
                }
            }
            Value::Array(items) => self.array(None, items, depth, &lead),
            primitive => self.lines.push(format!("{lead}{}", scalar(primitive))),
        }
    }
}

/// Indentation for `depth`.
fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Returns true for null, booleans, numbers and strings.
fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Joins primitives with the delimiter.
fn join_scalars<'v>(values: impl Iterator<Item = &'v Value>) -> String {
    values.map(scalar).collect::<Vec<_>>().join(&DELIMITER.to_string())
}

/// Shared field names when `items` can be written as a table.
///
/// Every item must be a non-empty object with the same keys in the same order, and every
/// value must be a primitive.
fn table_fields(items: &[Value]) -> Option<Vec<&str>> {
    let Value::Object(first) = items.first()? else {
        return None;
    };
    if first.is_empty() {
        return None;
    }
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    let uniform = items.iter().all(|item| match item {
        Value::Object(map) => {
            map.len() == fields.len()
                && map.keys().zip(&fields).all(|(k, f)| k == f)
                && map.values().all(is_primitive)
        }
        _ => false,
    });
    uniform.then_some(fields)
}

/// Encodes a primitive value.
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => encode_string(s),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Encodes an object key, quoting anything that is not a plain identifier.
fn encode_key(key: &str) -> String {
    let plain = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if plain { key.to_string() } else { quote(key) }
}

/// Encodes a string value, quoting only when it would otherwise be ambiguous.
fn encode_string(s: &str) -> String {
    if needs_quotes(s) { quote(s) } else { s.to_string() }
}

/// Returns true when `s` must be quoted to read back as the same string.
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || matches!(s, "true" | "false" | "null")
        || looks_numeric(s)
        || s.starts_with('-')
        || s.chars().any(|c| {
            matches!(c, ',' | ':' | '"' | '\\' | '[' | ']' | '{' | '}') || c.is_control()
        })
}

/// Returns true for strings a reader would take as a number, e.g. `42`, `1.5e3`, `007`.
fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut prev = None;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if seen_digit && !seen_exp => seen_exp = true,
            '+' | '-' if matches!(prev, Some('e' | 'E')) => {}
            _ => return false,
        }
        prev = Some(c);
    }
    seen_digit && !matches!(prev, Some('e' | 'E' | '+' | '-'))
}

/// Wraps `s` in double quotes with escapes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
