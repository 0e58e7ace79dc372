//! Serialize value trees back to KeyValues text.
//!
//! The serializer is the inverse of the parse pipeline: every key renders as
//! a quoted string followed by either a tab-separated quoted value or a
//! nested `{ ... }` block. With `pretty` set, nesting is indented one tab
//! per level. When a duplicate token is configured, synthetic `key-TOKEN-n`
//! names render as their base key, so disambiguated sibling blocks
//! round-trip to the original repeated keys.
//!
//! Token text is written verbatim; escape pairs preserved by the parser come
//! back out unchanged.

use crate::error::{Error, Result};
use crate::value::{Object, Value};

/// Serialize a document to KeyValues text.
///
/// Fails with [`Error::InvalidArgument`] unless the root is an object.
pub fn stringify(value: &Value, pretty: bool) -> Result<String> {
    let root = require_object(value)?;
    Ok(dump(root, pretty, 0, None))
}

/// Serialize a document, restoring duplicate block keys that were parsed
/// with the same `duplicate_token`.
pub fn stringify_with_token(value: &Value, pretty: bool, duplicate_token: &str) -> Result<String> {
    if duplicate_token.is_empty() {
        return Err(Error::InvalidArgument(
            "duplicate token must not be empty".to_string(),
        ));
    }
    let root = require_object(value)?;
    Ok(dump(root, pretty, 0, Some(duplicate_token)))
}

fn require_object(value: &Value) -> Result<&Object> {
    value.as_object().ok_or_else(|| {
        Error::InvalidArgument("stringify expects an object at the document root".to_string())
    })
}

fn dump(obj: &Object, pretty: bool, level: usize, token: Option<&str>) -> String {
    let line_indent = if pretty {
        "\t".repeat(level)
    } else {
        String::new()
    };

    let mut buf = String::new();
    for (key, value) in obj {
        let rendered = display_key(key, token);
        match value {
            Value::Object(child) => {
                buf.push_str(&line_indent);
                buf.push('"');
                buf.push_str(rendered);
                buf.push_str("\"\n");
                buf.push_str(&line_indent);
                buf.push_str("{\n");
                buf.push_str(&dump(child, pretty, level + 1, token));
                buf.push_str(&line_indent);
                buf.push_str("}\n");
            }
            Value::String(s) => {
                buf.push_str(&line_indent);
                buf.push('"');
                buf.push_str(rendered);
                buf.push_str("\"\t\t\"");
                buf.push_str(s);
                buf.push_str("\"\n");
            }
        }
    }
    buf
}

/// Strip a synthetic duplicate suffix back to the base key. The value still
/// comes from the synthetic key's own slot, so each disambiguated sibling
/// serializes with its own contents.
fn display_key<'a>(key: &'a str, token: Option<&str>) -> &'a str {
    match token {
        Some(token) => {
            let sep = format!("-{}-", token);
            match key.find(sep.as_str()) {
                Some(idx) => &key[..idx],
                None => key,
            }
        }
        None => key,
    }
}
