//! Phase 2: Token Matcher
//!
//! The matcher extracts a key and an optional value from the start of one
//! content line. It is a hand-written equivalent of the original format's
//! anchored pattern:
//!
//! - Keys are either quoted strings (at least one character, closing quote
//!   required) or bare words over `[a-z0-9_-]`.
//! - Values, separated by optional spaces/tabs, are either quoted strings
//!   (possibly unterminated) or bare words.
//!
//! A quoted value with no closing quote signals that the value continues on
//! the next physical line; the tree builder joins lines and rematches.
//!
//! Backslash escape pairs inside quoted tokens are preserved verbatim; only
//! the delimiting quotes are stripped.

/// The value portion of a matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A quoted value; `closed` is false when the closing quote is missing.
    Quoted { text: String, closed: bool },
    /// A bare word over `[a-z0-9_-]`.
    Bare(String),
}

impl RawValue {
    /// Whether this token terminates the line (no continuation needed).
    pub fn is_terminated(&self) -> bool {
        match self {
            RawValue::Quoted { closed, .. } => *closed,
            RawValue::Bare(_) => true,
        }
    }

    /// The token text with quote markers already stripped.
    pub fn text(&self) -> &str {
        match self {
            RawValue::Quoted { text, .. } => text,
            RawValue::Bare(text) => text,
        }
    }
}

/// A successful match at the start of a content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub key: String,
    pub value: Option<RawValue>,
}

/// Match a key and optional value at the start of `line`.
///
/// Returns `None` when no key can be matched, which the tree builder reports
/// as a syntax error. Trailing text after the match is ignored, as in the
/// original grammar.
pub fn match_key_value(line: &str) -> Option<LineMatch> {
    let bytes = line.as_bytes();

    let (key, after_key) = if bytes.first() == Some(&b'"') {
        let (end, closed) = scan_quoted(line, 1);
        // A quoted key must be non-empty and terminated.
        if !closed || end == 1 {
            return None;
        }
        (line[1..end].to_string(), end + 1)
    } else {
        let end = scan_bare(line, 0);
        if end == 0 {
            return None;
        }
        (line[..end].to_string(), end)
    };

    let at = skip_blanks(line, after_key);

    let value = if bytes.get(at) == Some(&b'"') {
        let (end, closed) = scan_quoted(line, at + 1);
        Some(RawValue::Quoted {
            text: line[at + 1..end].to_string(),
            closed,
        })
    } else {
        let end = scan_bare(line, at);
        if end > at {
            Some(RawValue::Bare(line[at..end].to_string()))
        } else {
            None
        }
    };

    Some(LineMatch { key, value })
}

/// Scan a quoted token body starting just after the opening quote.
/// Returns the exclusive end index of the body and whether the closing quote
/// was found. A backslash escapes the following character (except a newline,
/// which ends the escapable range and leaves the token unterminated).
fn scan_quoted(line: &str, start: usize) -> (usize, bool) {
    let bytes = line.as_bytes();
    let mut i = start;
    loop {
        match bytes.get(i) {
            None => return (i, false),
            Some(b'"') => return (i, true),
            Some(b'\\') => match bytes.get(i + 1) {
                Some(&next) if next != b'\n' => i += 2,
                _ => return (i, false),
            },
            Some(_) => i += 1,
        }
    }
}

/// Scan a bare word over `[a-z0-9_-]` starting at `start`; returns the
/// exclusive end index.
fn scan_bare(line: &str, start: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = start;
    while let Some(&b) = bytes.get(i) {
        if b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_' {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Skip spaces and tabs starting at `start`; returns the next index.
fn skip_blanks(line: &str, start: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = start;
    while matches!(bytes.get(i), Some(b' ') | Some(b'\t')) {
        i += 1;
    }
    i
}
