//! PCRE2-backed regular expressions with a std-regexp-style API.
//!
//! The matching engine itself is the PCRE2 library consumed through
//! `pcre2-sys`; this crate builds the library-grade surface on top of it:
//! non-overlapping global match enumeration, drift-safe replacement
//! splicing, split, submatch extraction, match-time callouts, and
//! shell-glob expansion over the filesystem, all safe to drive from many
//! threads sharing one compiled pattern.
//!
//! # Example
//!
//! ```
//! use recurve::Regex;
//!
//! let re = Regex::new(r"(\d+)\.\d+")?;
//! assert!(re.is_match(b"123.54321 Test")?);
//!
//! let out = re.replace_all(b"123.54321 Test", b"${1}.12345")?;
//! assert_eq!(out, b"123.12345 Test");
//! # Ok::<(), recurve::Error>(())
//! ```

mod callout;
mod error;
mod ffi;
mod glob;
mod matcher;
mod options;
mod regex;
mod replace;

#[cfg(test)]
mod glob_tests;
#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod replace_tests;

pub use callout::{CalloutBlock, CalloutFlags};
pub use error::{CompileError, Error, Result};
pub use glob::{compile_glob, convert_glob, glob};
pub use matcher::Match;
pub use options::Options;
pub use regex::Regex;

/// Version of the embedded PCRE2 library.
pub fn pcre2_version() -> String {
    ffi::version()
}
