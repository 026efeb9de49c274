use sandbox_fs::ops::{search_files, SearchFilesRequest};

mod common;

fn request(root: &std::path::Path, pattern: &str, excludes: &[&str]) -> SearchFilesRequest {
    SearchFilesRequest {
        path: root.to_string_lossy().into_owned(),
        pattern: pattern.to_string(),
        exclude_patterns: excludes.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn finds_matches_by_name_substring() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("src")).expect("mkdir");
    std::fs::write(dir.path().join("src/test.js"), "").expect("write");
    std::fs::write(dir.path().join("src/other.js"), "").expect("write");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "test", &[])).expect("search");

    assert_eq!(response.matches.len(), 1);
    assert!(response.matches[0].ends_with("src/test.js"));
}

#[test]
fn matching_is_case_insensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("README.md"), "").expect("write");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "readme", &[])).expect("search");
    assert_eq!(response.matches.len(), 1);
}

#[test]
fn bare_exclude_pattern_prunes_directory_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("node_modules")).expect("mkdir");
    std::fs::create_dir(dir.path().join("src")).expect("mkdir");
    std::fs::write(dir.path().join("node_modules/test.js"), "").expect("write");
    std::fs::write(dir.path().join("src/test.js"), "").expect("write");

    let ctx = common::single_root(dir.path());
    let response =
        search_files(&ctx, request(dir.path(), "test", &["node_modules"])).expect("search");

    assert_eq!(response.matches.len(), 1);
    assert!(response.matches[0].ends_with("src/test.js"));
}

#[test]
fn wildcard_exclude_pattern_is_used_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("test.log"), "").expect("write");
    std::fs::write(dir.path().join("test.txt"), "").expect("write");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "test", &["*.log"])).expect("search");

    assert_eq!(response.matches.len(), 1);
    assert!(response.matches[0].ends_with("test.txt"));
}

#[test]
fn directories_match_by_name_too() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("tests")).expect("mkdir");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "test", &[])).expect("search");
    assert_eq!(response.matches.len(), 1);
    assert!(response.matches[0].ends_with("tests"));
}

#[test]
#[cfg(unix)]
fn escaping_symlink_is_skipped_silently() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().expect("tempdir");
    let outside = tempfile::tempdir().expect("tempdir");
    std::fs::write(outside.path().join("test-secret.txt"), "").expect("write");

    // Symlink inside the root pointing outside it: its name matches the
    // query, but resolution fails and the entry is skipped, not fatal.
    symlink(outside.path(), dir.path().join("test-link")).expect("symlink");
    std::fs::write(dir.path().join("test-real.txt"), "").expect("write");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "test", &[])).expect("search");

    assert_eq!(response.matches.len(), 1);
    assert!(response.matches[0].ends_with("test-real.txt"));
}

#[test]
#[cfg(unix)]
fn entries_with_non_unicode_names_are_still_validated() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().expect("tempdir");
    let outside = tempfile::tempdir().expect("tempdir");

    // Both names carry an invalid UTF-8 byte. The regular file is a
    // legitimate match; the symlink escapes the root and must be skipped
    // even though its lossy-converted name points at nothing on disk.
    let file_name = OsString::from_vec(b"test-\xff-file".to_vec());
    std::fs::write(dir.path().join(&file_name), "").expect("write");

    let link_name = OsString::from_vec(b"test-\xff-link".to_vec());
    symlink(outside.path(), dir.path().join(&link_name)).expect("symlink");

    let ctx = common::single_root(dir.path());
    let response = search_files(&ctx, request(dir.path(), "test", &[])).expect("search");

    assert_eq!(response.matches.len(), 1);
    assert_eq!(
        response.matches[0].file_name().expect("file name"),
        &*file_name
    );
}

#[test]
fn search_root_outside_sandbox_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let elsewhere = tempfile::tempdir().expect("tempdir");

    let ctx = common::single_root(dir.path());
    let err = search_files(&ctx, request(elsewhere.path(), "x", &[])).expect_err("reject");
    assert!(matches!(err, sandbox_fs::Error::OutsideSandbox { .. }), "{err:?}");
}
