//! Recursive deep merge of configuration layers.

use serde_json::Value;

use crate::parser::ConfigObject;

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

/// Merges `overlay` into `base`; `overlay` wins every collision.
///
/// Objects colliding with objects are merged recursively. Any other
/// collision (scalar, array, or object against non-object) replaces the
/// base value wholesale. Arrays are not concatenated.
///
/// # Examples
///
/// ```
/// use layered_rc::merge::deep_merge;
/// use serde_json::{Value, json};
///
/// let Value::Object(mut base) = json!({"db": {"host": "a", "port": 1}}) else { unreachable!() };
/// let Value::Object(overlay) = json!({"db": {"port": 2}}) else { unreachable!() };
/// deep_merge(&mut base, &overlay);
/// assert_eq!(Value::Object(base), json!({"db": {"host": "a", "port": 2}}));
/// ```
pub fn deep_merge(base: &mut ConfigObject, overlay: &ConfigObject) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (base.get_mut(key), value) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

/// Folds `layers` left to right into a new object; later layers win.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a ConfigObject>) -> ConfigObject {
    layers.into_iter().fold(ConfigObject::new(), |mut merged, layer| {
        deep_merge(&mut merged, layer);
        merged
    })
}
