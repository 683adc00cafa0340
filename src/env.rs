//! Environment variable decoding.
//!
//! Variables named `<prefix><path>` are decoded into nested objects, with
//! `__` separating path segments: `APP_server__port=8080` becomes
//! `{"server": {"port": "8080"}}`. Values are always strings.

use serde_json::{Map, Value};

use crate::defaults::ENV_DELIMITER;
use crate::parser::ConfigObject;

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

/// An immutable snapshot of environment variables, in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of variables in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if the snapshot holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decodes every variable whose name starts with `prefix`, ignoring case.
///
/// The first value written at a node wins. A variable whose path runs into
/// a string set by an earlier variable stops there, and a variable whose
/// final segment is already occupied (by a string or an object) is dropped.
///
/// # Examples
///
/// ```
/// use layered_rc::env::{EnvSnapshot, decode};
/// use serde_json::{Value, json};
///
/// let env: EnvSnapshot = [("APP_db__host", "localhost"), ("OTHER", "x")]
///     .into_iter()
///     .collect();
/// assert_eq!(Value::Object(decode("app_", &env)), json!({"db": {"host": "localhost"}}));
/// ```
#[must_use]
pub fn decode(prefix: &str, env: &EnvSnapshot) -> ConfigObject {
    let mut out = Map::new();

    for (key, value) in env.iter() {
        let Some(rest) = strip_prefix_ignore_case(key, prefix) else {
            continue;
        };
        let segments: Vec<&str> = rest
            .split(ENV_DELIMITER)
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            continue;
        }

        tracing::trace!(variable = key, "Decoding environment variable");
        insert_path(&mut out, &segments, value);
    }

    out
}

/// Compares character by character using Unicode lower-case mappings.
fn strip_prefix_ignore_case<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = key.chars();
    for expected in prefix.chars() {
        let actual = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(rest.as_str())
}

/// Walks `segments` into `out`, assigning `value` at the last one unless occupied.
fn insert_path(out: &mut ConfigObject, segments: &[&str], value: &str) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut cursor = out;
    for segment in parents {
        let slot = cursor
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match slot {
            Value::Object(next) => cursor = next,
            _ => return,
        }
    }

    cursor
        .entry((*leaf).to_string())
        .or_insert_with(|| Value::String(value.to_string()));
}
