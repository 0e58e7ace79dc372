//! Error types for KeyValues parsing and serialization.

use thiserror::Error;

/// Result type for KeyValues operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse context carrying the document path for error reporting and
/// `#base` resolution.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub path: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(String::from),
        }
    }

    /// Format a location suffix for error messages. `line` is zero-based.
    pub fn loc_suffix(&self, line: usize) -> String {
        match &self.path {
            Some(path) => format!(" on line {} of <{}>", line + 1, path),
            None => format!(" on line {}", line + 1),
        }
    }
}

/// Error type for KeyValues operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied argument is unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A key opened a block but the next content line is not `{`.
    #[error("expected opening bracket{0}")]
    ExpectedBracket(String),

    /// A content line matches no key/value grammar.
    #[error("invalid syntax{0}")]
    InvalidSyntax(String),

    /// Brace nesting did not return to the document root.
    #[error("unbalanced braces{0}")]
    UnbalancedBraces(String),

    /// The external collaborator failed to supply a `#base` document.
    #[error("unable to fetch \"{path}\": {source}")]
    Fetch {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attach location information to an error.
    pub fn with_location(self, ctx: &ParseContext, line: usize) -> Self {
        let suffix = ctx.loc_suffix(line);
        match self {
            Error::ExpectedBracket(_) => Error::ExpectedBracket(suffix),
            Error::InvalidSyntax(_) => Error::InvalidSyntax(suffix),
            Error::UnbalancedBraces(_) => Error::UnbalancedBraces(suffix),
            other => other,
        }
    }
}
