//! External document collaborator for `#base` includes.
//!
//! The parser never performs I/O itself; when a `#base` directive names
//! another document, it asks a [`DocumentLoader`] for that document's raw
//! text and parses whatever comes back. Failures surface as
//! [`Error::Fetch`](crate::Error::Fetch) and abort the enclosing parse.

use std::io;
use std::path::Path;

/// Supplies the raw text of an external document given its resolved path.
///
/// Implementations perform no parsing; they only fetch bytes-as-text. The
/// crate ships [`FsLoader`] for on-disk documents; tests and embedders can
/// substitute an in-memory implementation.
pub trait DocumentLoader {
    fn load(&self, path: &str) -> io::Result<String>;
}

/// A [`DocumentLoader`] that reads documents from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Resolve a `#base` relative reference against the directory of the
/// document that contains it.
pub(crate) fn resolve_relative(current: &str, relative: &str) -> String {
    match Path::new(current).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(relative).to_string_lossy().into_owned()
        }
        _ => relative.to_string(),
    }
}
