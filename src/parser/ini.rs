//! Permissive INI decoding and encoding.
//!
//! The decoder accepts anything: lines it cannot make sense of are skipped,
//! so it never fails on text input. Sections nest on unescaped dots
//! (`[server.tls]`) and `key[] = value` lines build arrays.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::ConfigObject;

/// Matches either a `[section]` header or a `key` / `key = value` line.
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\]\s*$|^([^=]+)(=(.*))?$").expect("INI line pattern is valid")
});

// ============================================================================
// Decoding
// ============================================================================

/// Decodes INI text into a configuration object.
///
/// # Examples
///
/// ```
/// use layered_rc::parser::ini;
/// use serde_json::json;
///
/// let config = ini::decode("debug = true\n\n[server]\nport = 8080 ; inline\n");
/// assert_eq!(
///     serde_json::Value::Object(config),
///     json!({"debug": true, "server": {"port": "8080"}})
/// );
/// ```
#[must_use]
pub fn decode(text: &str) -> ConfigObject {
    let mut out = Map::new();
    let mut section: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        let Some(caps) = LINE.captures(line) else {
            continue;
        };

        if let Some(header) = caps.get(1) {
            let (name, _) = unquote(header.as_str());
            out.entry(name.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            section = Some(name);
            continue;
        }

        let Some(key) = caps.get(2) else {
            continue;
        };
        let (key, _) = unquote(key.as_str());
        let value = match caps.get(4) {
            Some(raw_value) => {
                let (text, quoted) = unquote(raw_value.as_str());
                if quoted { Value::String(text) } else { literal(text) }
            }
            _ => Value::Bool(true),
        };

        let target = match &section {
            None => &mut out,
            Some(name) => match out.get_mut(name) {
                Some(Value::Object(map)) => map,
                // A scalar already owns this name; the section is unreachable.
                _ => continue,
            },
        };
        assign(target, key, value);
    }

    nest_dotted_sections(&mut out);
    out
}

/// Stores a value, appending when the key uses the `key[]` array form.
fn assign(target: &mut ConfigObject, key: String, value: Value) {
    let Some(array_key) = key.strip_suffix("[]") else {
        target.insert(key, value);
        return;
    };

    let slot = target
        .entry(array_key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    match slot {
        Value::Array(items) => items.push(value),
        existing => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
    }
}

/// Converts the unquoted literals `true`, `false` and `null`.
fn literal(text: String) -> Value {
    match text.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::String(text),
    }
}

/// Trims a raw key or value and removes quoting or inline comments.
///
/// Returns the text and whether it was quoted.
fn unquote(raw: &str) -> (String, bool) {
    let val = raw.trim();

    if is_quoted(val, '"') {
        return match serde_json::from_str::<String>(val) {
            Ok(decoded) => (decoded, true),
            Err(_) => (val.to_string(), false),
        };
    }
    if is_quoted(val, '\'') {
        return (val[1..val.len() - 1].to_string(), true);
    }

    let mut unescaped = String::with_capacity(val.len());
    let mut escaping = false;
    for c in val.chars() {
        if escaping {
            if !matches!(c, '\\' | ';' | '#') {
                unescaped.push('\\');
            }
            unescaped.push(c);
            escaping = false;
        } else if c == ';' || c == '#' {
            break;
        } else if c == '\\' {
            escaping = true;
        } else {
            unescaped.push(c);
        }
    }
    if escaping {
        unescaped.push('\\');
    }

    (unescaped.trim().to_string(), false)
}

fn is_quoted(val: &str, quote: char) -> bool {
    val.len() >= 2 && val.starts_with(quote) && val.ends_with(quote)
}

/// Moves `a.b` sections under `a` as nested objects.
fn nest_dotted_sections(out: &mut ConfigObject) {
    let dotted: Vec<String> = out
        .iter()
        .filter(|(key, value)| value.is_object() && key.contains('.'))
        .map(|(key, _)| key.clone())
        .collect();

    for key in dotted {
        let Some(section) = out.remove(&key) else {
            continue;
        };
        let mut parts = split_section(&key);
        let Some(leaf) = parts.pop() else {
            continue;
        };

        let mut cursor = &mut *out;
        for part in parts {
            let slot = cursor
                .entry(part)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            cursor = slot.as_object_mut().expect("slot holds an object");
        }

        let unmerged = match (cursor.get_mut(&leaf), section) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                existing.extend(incoming);
                None
            }
            (_, section) => Some(section),
        };
        if let Some(section) = unmerged {
            cursor.insert(leaf, section);
        }
    }
}

/// Splits a section name on unescaped dots, unescaping `\.`.
fn split_section(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a configuration object as INI text.
///
/// Scalars and arrays of the top-level object come first, followed by one
/// `[section]` per nested object. Deeper objects use dotted section names.
#[must_use]
pub fn encode(config: &ConfigObject) -> String {
    let mut out = String::new();
    encode_section(&mut out, config, None);
    out
}

fn encode_section(out: &mut String, config: &ConfigObject, section: Option<&str>) {
    let mut children = Vec::new();

    for (key, value) in config {
        match value {
            Value::Object(child) => children.push((key, child)),
            Value::Array(items) => {
                for item in items {
                    let _ = writeln!(out, "{}[]={}", safe(key), encode_value(item));
                }
            }
            scalar => {
                let _ = writeln!(out, "{}={}", safe(key), encode_value(scalar));
            }
        }
    }

    for (key, child) in children {
        let escaped = key.replace('.', "\\.");
        let name = match section {
            Some(parent) => format!("{parent}.{escaped}"),
            None => escaped,
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "[{name}]");
        encode_section(out, child, Some(&name));
    }
}

fn encode_value(value: &Value) -> String {
    match value {
        Value::String(text) => safe(text),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => safe(&nested.to_string()),
    }
}

/// Quotes text that would otherwise decode to something else.
fn safe(text: &str) -> String {
    let needs_quotes = text != text.trim()
        || matches!(text, "true" | "false" | "null")
        || text.contains(['=', ';', '#', '"', '\'', '\\', '\n', '\r']);

    if needs_quotes {
        serde_json::to_string(text).unwrap_or_else(|_| text.to_string())
    } else {
        text.to_string()
    }
}
