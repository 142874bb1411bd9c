use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::{Error, compile_glob, convert_glob, glob};

/// A directory tree shared by the expansion tests:
///
/// ```text
/// root/
///   dir1/
///   dir2/
///   file1
///   file2
///   test1/dir4/text.txt
/// ```
fn fixture_tree() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("dir1")).unwrap();
    fs::create_dir(root.path().join("dir2")).unwrap();
    fs::create_dir_all(root.path().join("test1/dir4")).unwrap();
    fs::write(root.path().join("file1"), b"one").unwrap();
    fs::write(root.path().join("file2"), b"two").unwrap();
    fs::write(root.path().join("test1/dir4/text.txt"), b"text").unwrap();
    root
}

fn expand(root: &TempDir, glob_tail: &str) -> Vec<PathBuf> {
    let pattern = format!("{}/{glob_tail}", root.path().display());
    glob(&pattern).unwrap()
}

#[test]
fn conversion_yields_a_usable_pattern() {
    let pattern = convert_glob("*.txt").unwrap();
    assert!(!pattern.is_empty());
}

#[test]
fn recursive_marker_spans_directory_levels() {
    let re = compile_glob("/**/bin").unwrap();

    assert!(re.is_match(b"/bin").unwrap());
    assert!(re.is_match(b"/usr/bin").unwrap());
    assert!(re.is_match(b"/usr/local/bin").unwrap());

    assert!(!re.is_match(b"/usr").unwrap());
    assert!(!re.is_match(b"/usr/local").unwrap());
    assert!(!re.is_match(b"/home").unwrap());
}

#[test]
fn literal_existing_path_expands_to_itself() {
    let root = fixture_tree();
    let path = root.path().to_str().unwrap();
    assert_eq!(glob(path).unwrap(), vec![root.path().to_path_buf()]);
}

#[test]
fn star_matches_immediate_children_in_order() {
    let root = fixture_tree();

    assert_eq!(
        expand(&root, "dir*"),
        vec![root.path().join("dir1"), root.path().join("dir2")]
    );
    assert_eq!(
        expand(&root, "file*"),
        vec![root.path().join("file1"), root.path().join("file2")]
    );
}

#[test]
fn star_does_not_descend() {
    let root = fixture_tree();
    assert_eq!(expand(&root, "*.txt"), Vec::<PathBuf>::new());
}

#[test]
fn recursive_glob_walks_the_whole_tree() {
    let root = fixture_tree();
    assert_eq!(
        expand(&root, "**/*.txt"),
        vec![root.path().join("test1/dir4/text.txt")]
    );
}

#[test]
fn empty_glob_expands_to_nothing() {
    assert_eq!(glob("").unwrap(), Vec::<PathBuf>::new());
}

#[test]
fn missing_literal_path_expands_to_nothing() {
    let root = fixture_tree();
    let pattern = format!("{}/no-such-entry", root.path().display());
    assert_eq!(glob(&pattern).unwrap(), Vec::<PathBuf>::new());
}

#[test]
fn missing_search_directory_is_an_error() {
    let root = fixture_tree();
    let pattern = format!("{}/no-such-dir/dir*", root.path().display());
    match glob(&pattern) {
        Err(Error::Walk { path, .. }) => {
            assert_eq!(path, root.path().join("no-such-dir"));
        }
        other => panic!("expected walk error, got {other:?}"),
    }
}
