//! JSON-with-comments decoding.

use serde_json::Value;

use super::ConfigObject;

/// Removes `//` line comments and `/* */` block comments from JSON text.
///
/// String literals are left untouched, including any comment markers inside
/// them. Newlines inside comments are kept so decode errors still point at
/// the right line.
///
/// # Examples
///
/// ```
/// use layered_rc::parser::strip_comments;
///
/// let text = "{/* note */ \"url\": \"http://x\" // trailing\n}";
/// assert_eq!(strip_comments(text), "{  \"url\": \"http://x\" \n}");
/// ```
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Strips comments and strictly decodes the remaining JSON document.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] when the text is not valid JSON.
pub fn decode(contents: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_comments(contents))
}

/// Keeps only object documents; anything else cannot be merged.
#[must_use]
pub fn into_object(value: Value) -> Option<ConfigObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
