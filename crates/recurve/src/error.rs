//! Errors surfaced by compilation, matching and glob expansion.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// A malformed pattern, as reported by the PCRE2 compiler.
///
/// `offset` is the byte offset within the pattern text where the problem
/// was detected. An offset of zero means the compiler did not attribute
/// the error to a specific position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "offset {}: {}", self.offset, self.message)
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors that can occur while compiling patterns, running matches, or
/// expanding globs.
///
/// "No match" is never an error: search operations report it as `None` or
/// an empty sequence. Likewise a named group that does not exist resolves
/// to `None`, and a non-participating capture group expands to nothing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The pattern failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A match attempt failed for a reason other than "no match".
    #[error("match failed: {message} (pcre2 code {code})")]
    Match { code: i32, message: String },

    /// Glob-to-pattern conversion failed.
    #[error("glob conversion failed: {message} (pcre2 code {code})")]
    Convert { code: i32, message: String },

    /// The pattern handle was closed and can no longer be used.
    #[error("regex was closed")]
    Closed,

    /// The primitive could not allocate a required resource.
    #[error("pcre2 resource allocation failed: {0}")]
    Resource(&'static str),

    /// Filesystem traversal failed during glob expansion.
    #[error("glob walk failed at {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
}

impl Error {
    pub(crate) fn walk(path: PathBuf, source: io::Error) -> Self {
        Self::Walk {
            path,
            source: Arc::new(source),
        }
    }
}

/// Result type for regex and glob operations.
pub type Result<T> = std::result::Result<T, Error>;
