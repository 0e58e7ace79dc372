//! KeyValues value representation.

use indexmap::IndexMap;
use std::fmt;

/// An object node: a string-keyed mapping that preserves insertion order.
///
/// Order matters in KeyValues documents (engine code reads some blocks
/// positionally), so this is an `IndexMap` rather than a `HashMap`.
pub type Object = IndexMap<String, Value>;

/// A KeyValues value.
///
/// The format is string-only: every leaf is text, every interior node is an
/// ordered mapping. Sibling keys are unique as stored; duplicate blocks in
/// the source are either merged or kept apart under synthetic `key-TOKEN-n`
/// keys when a duplicate token is configured (see
/// [`parse_with_token`](crate::parse_with_token)).
#[derive(Clone, PartialEq)]
pub enum Value {
    /// A leaf textual value.
    String(String),
    /// A nested `{ ... }` block.
    Object(Object),
}

impl Value {
    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an `Object`.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object if this is an `Object`.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns `true` if this value is an `Object`.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(obj) => f.debug_map().entries(obj).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}
