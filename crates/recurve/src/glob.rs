//! Shell-glob matching over the filesystem.
//!
//! A glob is translated to a regular expression by the primitive's
//! pattern-conversion facility and then driven over a directory listing:
//! flat for plain globs, a full recursive walk when the glob contains the
//! `**` recursive-descent marker.

use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ffi;
use crate::regex::Regex;

/// Translate a shell glob into an equivalent regular expression.
pub fn convert_glob(glob: &str) -> Result<String> {
    ffi::convert_glob(glob)
}

/// Translate a shell glob and compile the resulting pattern.
pub fn compile_glob(glob: &str) -> Result<Regex> {
    Regex::new(&convert_glob(glob)?)
}

/// Expand a shell glob into the list of matching filesystem paths, in
/// lexical order.
///
/// An empty glob expands to nothing. A glob naming an existing entry
/// literally expands to that sole path. A glob with no metacharacters
/// (`*`, `[`, `]`, `?`) that names nothing expands to nothing. Otherwise
/// the leading metacharacter-free path segments select the directory to
/// search, which must exist; with `**` present the whole tree under it is
/// walked (which may be slow for large trees), otherwise only its
/// immediate children are tested.
pub fn glob(glob: &str) -> Result<Vec<PathBuf>> {
    if glob.is_empty() {
        return Ok(Vec::new());
    }
    if fs::symlink_metadata(glob).is_ok() {
        return Ok(vec![PathBuf::from(glob)]);
    }
    if !has_glob_chars(glob) {
        return Ok(Vec::new());
    }

    let base = base_dir(glob);
    fs::symlink_metadata(&base).map_err(|source| Error::walk(base.clone(), source))?;

    let regex = compile_glob(glob)?;
    let mut matches = Vec::new();
    if glob.contains("**") {
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|source| {
                let path = source
                    .path()
                    .map_or_else(|| base.clone(), Path::to_path_buf);
                Error::walk(path, source.into())
            })?;
            if regex.is_match(path_bytes(entry.path()))? {
                matches.push(entry.path().to_path_buf());
            }
        }
    } else {
        for path in list_dir(&base)? {
            if regex.is_match(path_bytes(&path))? {
                matches.push(path);
            }
        }
    }
    Ok(matches)
}

/// Immediate children of `dir`, sorted by name.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::walk(dir.to_path_buf(), source))?;
    let mut children = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|source| Error::walk(dir.to_path_buf(), source))?;
    children.sort();
    Ok(children)
}

fn has_glob_chars(text: &str) -> bool {
    text.contains(['*', '[', ']', '?'])
}

/// The directory a glob search is restricted to: the leading run of path
/// segments free of glob metacharacters. Absolute globs keep their root;
/// a glob whose very first segment has metacharacters searches the
/// current directory.
fn base_dir(glob: &str) -> PathBuf {
    let mut base = PathBuf::new();
    if Path::new(glob).is_absolute() {
        base.push(MAIN_SEPARATOR_STR);
    }
    for segment in glob.split(MAIN_SEPARATOR) {
        if segment.is_empty() {
            continue;
        }
        if has_glob_chars(segment) {
            break;
        }
        base.push(segment);
    }
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

fn path_bytes(path: &Path) -> &[u8] {
    path.as_os_str().as_encoded_bytes()
}
