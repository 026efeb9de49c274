//! Lexical path helpers used by the sandbox resolver.
//!
//! Everything here is purely lexical: no function touches the filesystem or
//! resolves symlinks. Symlink resolution happens in [`crate::sandbox`]
//! against live filesystem state.
//!
//! Invariants of `normalize_lexical`:
//! - Removes `.` segments.
//! - Resolves `..` against preceding *normal* segments when possible.
//! - Preserves leading `..` for relative paths (`../../a/../b` → `../../b`).
//! - For absolute paths, `..` cannot escape the filesystem root
//!   (`/../etc` → `/etc`).

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

pub(crate) fn normalize_lexical(path: &Path) -> PathBuf {
    enum Segment {
        ParentDir,
        Normal(OsString),
    }

    let mut prefix: Option<OsString> = None;
    let mut has_root = false;
    let mut segments: Vec<Segment> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(segments.last(), Some(Segment::Normal(_))) {
                    segments.pop();
                } else if !has_root {
                    segments.push(Segment::ParentDir);
                }
            }
            Component::Normal(part) => segments.push(Segment::Normal(part.to_os_string())),
            Component::RootDir => has_root = true,
            Component::Prefix(prefix_comp) => {
                prefix = Some(prefix_comp.as_os_str().to_os_string());
            }
        }
    }

    let mut out = PathBuf::new();
    if let Some(prefix) = prefix {
        out.push(Path::new(&prefix));
    }
    if has_root {
        out.push(std::path::MAIN_SEPARATOR.to_string());
    }
    for segment in segments {
        match segment {
            Segment::ParentDir => out.push(".."),
            Segment::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() && path.is_relative() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Expands a leading `~` or `~/` to the caller's home directory.
///
/// Paths that do not start with `~`, or `~user` forms, are returned
/// unchanged. When no home directory can be determined the `~` is left in
/// place and the path falls through to the ordinary containment checks.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Path-segment prefix check: `/allowed-eviltwin` does not start with
/// `/allowed`. Both sides must already be lexically normalized.
pub(crate) fn starts_with_segments(path: &Path, prefix: &Path) -> bool {
    path.starts_with(prefix)
}
