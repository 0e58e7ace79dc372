//! Parser and serializer for Valve's KeyValues (VDF) text format.
//!
//! KeyValues is the brace-delimited, order-sensitive, string-only tree
//! notation used throughout Valve's games and tools (gameinfo.txt, item
//! schemas, localization files).
//!
//! # Parsing Pipeline
//!
//! The parser operates in phases:
//!
//! 1. **Line Normalizer**: Strips non-ASCII bytes and whitespace from each
//!    physical line and classifies blank, comment, directive, and content
//!    lines.
//!
//! 2. **Token Matcher**: Extracts a quoted or bare key and an optional
//!    quoted or bare value from a content line; an unterminated quoted
//!    value continues on the next physical line.
//!
//! 3. **Tree Builder**: A stack machine that turns matched lines into a
//!    nested ordered-mapping tree, handling duplicate block keys and the
//!    `"REMOVE"` sentinel.
//!
//! 4. **External Merge**: Folds documents pulled in by `#base` directives
//!    into the result as lower-priority override sources.
//!
//! Serialization walks the tree back to text and is the independent inverse
//! path.

mod encode;
mod error;
mod lexer;
mod loader;
mod merge;
mod parser;
mod scanner;
mod value;

pub use encode::{stringify, stringify_with_token};
pub use error::{Error, Result};
pub use loader::{DocumentLoader, FsLoader};
pub use value::{Object, Value};

use error::ParseContext;

/// Parse a KeyValues document from a string.
///
/// `#base` directives are inert without a document path; see
/// [`parse_with_includes`].
///
/// # Example
///
/// ```
/// let doc = libvdf::parse("\"name\"\t\"gordon\"").unwrap();
/// let root = doc.as_object().unwrap();
/// assert_eq!(root.get("name").unwrap().as_str(), Some("gordon"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parser::parse_document(input, &ParseContext::default(), None, None)
}

/// Parse a KeyValues document, keeping duplicate sibling block keys apart
/// under synthetic `key-TOKEN-n` names instead of merging them.
///
/// Serializing the result with [`stringify_with_token`] and the same token
/// reproduces the original repeated keys.
pub fn parse_with_token(input: &str, duplicate_token: &str) -> Result<Value> {
    parser::parse_document(input, &ParseContext::default(), Some(duplicate_token), None)
}

/// Parse a KeyValues document that may pull in external documents via
/// `#base` directives.
///
/// `path` identifies the current document; `#base` references resolve
/// against its parent directory and are fetched through `loader`. External
/// documents are parsed standalone, so their own `#base` lines are inert.
pub fn parse_with_includes(
    input: &str,
    path: &str,
    duplicate_token: Option<&str>,
    loader: &dyn DocumentLoader,
) -> Result<Value> {
    parser::parse_document(
        input,
        &ParseContext::new(Some(path)),
        duplicate_token,
        Some(loader),
    )
}
