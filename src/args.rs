//! Flat argument tokenizer.
//!
//! Turns raw process arguments into a configuration object so they can be
//! merged like any other layer:
//!
//! | Input               | Result                          |
//! |---------------------|---------------------------------|
//! | `--port 80`         | `{"port": 80}`                  |
//! | `--name=app`        | `{"name": "app"}`               |
//! | `--verbose`         | `{"verbose": true}`             |
//! | `--no-color`        | `{"color": false}`              |
//! | `--db.host h`       | `{"db": {"host": "h"}}`         |
//! | `-vx`               | `{"v": true, "x": true}`        |
//! | `serve`             | `{"_": ["serve"]}`              |
//!
//! Everything after `--` is positional. A key given more than once
//! collects its values into an array.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::parser::ConfigObject;

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;

/// Key collecting positional arguments.
pub const POSITIONAL_KEY: &str = "_";

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$").expect("number pattern is valid")
});

/// Tokenizes `args` (without the program name).
///
/// # Examples
///
/// ```
/// use layered_rc::args;
/// use serde_json::{Value, json};
///
/// let argv = args::parse(["--config", "/tmp/apprc", "--no-color"]);
/// assert_eq!(Value::Object(argv), json!({"config": "/tmp/apprc", "color": false}));
/// ```
pub fn parse<I, S>(args: I) -> ConfigObject
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let mut out = Map::new();
    let mut positional = Vec::new();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        let next = args.get(i + 1).map(String::as_str);
        i += 1;

        if arg == "--" {
            positional.extend(args[i..].iter().map(|a| coerce(a)));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if parse_long(&mut out, long, next) {
                i += 1;
            }
            continue;
        }

        if let Some(short) = arg.strip_prefix('-').filter(|s| !s.is_empty() && !is_number(arg)) {
            if parse_short(&mut out, short, next) {
                i += 1;
            }
            continue;
        }

        positional.push(coerce(arg));
    }

    if !positional.is_empty() {
        out.insert(POSITIONAL_KEY.to_string(), Value::Array(positional));
    }
    out
}

/// Handles `--key=value`, `--no-key`, `--key value` and `--key`.
///
/// Returns `true` if `next` was consumed as the value.
fn parse_long(out: &mut ConfigObject, long: &str, next: Option<&str>) -> bool {
    if let Some((key, value)) = long.split_once('=') {
        set(out, key, coerce(value));
        return false;
    }
    if let Some(key) = long.strip_prefix("no-") {
        set(out, key, Value::Bool(false));
        return false;
    }
    match next.filter(|n| takes_value(n)) {
        Some(value) => {
            set(out, long, coerce_flag_value(value));
            true
        }
        None => {
            set(out, long, Value::Bool(true));
            false
        }
    }
}

/// Handles grouped single-letter flags; only the last letter may take a value.
///
/// Returns `true` if `next` was consumed as the value.
fn parse_short(out: &mut ConfigObject, short: &str, next: Option<&str>) -> bool {
    let letters: Vec<char> = short.chars().collect();
    let Some((last, rest)) = letters.split_last() else {
        return false;
    };
    for letter in rest {
        set(out, &letter.to_string(), Value::Bool(true));
    }
    parse_long(out, &last.to_string(), next)
}

/// A following argument is consumed as a value unless it looks like a flag.
fn takes_value(next: &str) -> bool {
    next == "-" || !next.starts_with('-') || is_number(next)
}

fn is_number(text: &str) -> bool {
    NUMBER.is_match(text)
}

/// Numeric-looking text becomes a JSON number; everything else stays a string.
fn coerce(text: &str) -> Value {
    if is_number(text) {
        if let Ok(int) = text.parse::<i64>() {
            return Value::Number(int.into());
        }
        if let Some(float) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(float);
        }
    }
    Value::String(text.to_string())
}

/// Like [`coerce`], but a separate `true`/`false` argument becomes a boolean.
fn coerce_flag_value(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => coerce(text),
    }
}

/// Stores `value` under a dotted key, collecting repeats into an array.
fn set(out: &mut ConfigObject, key: &str, value: Value) {
    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(leaf) = parts.pop() else {
        return;
    };

    let mut cursor = out;
    for part in parts {
        let slot = cursor
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        cursor = slot.as_object_mut().expect("slot holds an object");
    }

    match cursor.get_mut(leaf) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
        None => {
            cursor.insert(leaf.to_string(), value);
        }
    }
}
