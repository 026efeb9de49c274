//! The sandbox resolver: every caller-supplied path is resolved against a
//! fixed allow-list of root directories before any filesystem operation runs.
//!
//! Containment is checked twice: once lexically against the normalized
//! request (cheap rejection of obvious escapes), and once against the
//! symlink-dereferenced path where the target exists. The second check is
//! what defeats a symlink placed *inside* an allowed root that points
//! *outside* it.
//!
//! These are path-based checks over `canonicalize`, not a descriptor-chain
//! (`openat`) confinement walk. Treat them as best-effort root-bounded
//! validation for cooperative local tooling, not OS-sandbox-equivalent
//! confinement against a hostile local process.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path_utils;

#[derive(Debug, Clone)]
struct Root {
    /// The root as supplied at startup, normalized. Used for display and for
    /// the lexical pre-existence check.
    path: PathBuf,
    /// Fully symlink-resolved form, used when checking dereferenced paths.
    canonical: PathBuf,
}

/// The immutable allow-list of root directories, established once at startup.
#[derive(Debug, Clone)]
pub struct AllowedRoots {
    roots: Vec<Root>,
}

impl AllowedRoots {
    /// Builds the allow-list from startup arguments.
    ///
    /// Each entry is home-expanded, made absolute against the current working
    /// directory, lexically normalized, and stat-validated: startup fails
    /// unless every entry exists and is a directory. The canonical form of
    /// each root is captured alongside so dereferenced-path checks stay
    /// consistent when a root itself sits behind a symlink.
    pub fn new(dirs: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Self> {
        let mut roots = Vec::new();
        for dir in dirs {
            let normalized = normalize_requested(&path_utils::expand_home(dir.as_ref()))?;
            let canonical = normalized.canonicalize().map_err(|err| {
                Error::InvalidRoots(format!(
                    "failed to resolve root {}: {err}",
                    normalized.display()
                ))
            })?;
            let meta = fs::metadata(&canonical).map_err(|err| {
                Error::InvalidRoots(format!(
                    "failed to stat root {}: {err}",
                    canonical.display()
                ))
            })?;
            if !meta.is_dir() {
                return Err(Error::InvalidRoots(format!(
                    "root {} is not a directory",
                    canonical.display()
                )));
            }
            roots.push(Root {
                path: normalized,
                canonical: path_utils::normalize_lexical(&canonical),
            });
        }
        if roots.is_empty() {
            return Err(Error::InvalidRoots("no allowed directories".to_string()));
        }
        Ok(Self { roots })
    }

    /// The roots as supplied at startup (normalized), for display.
    pub fn roots(&self) -> Vec<&Path> {
        self.roots.iter().map(|root| root.path.as_path()).collect()
    }

    /// Lexical containment: the requested path may be phrased against either
    /// the as-given root or its canonical form.
    fn contains_requested(&self, normalized: &Path) -> bool {
        self.roots.iter().any(|root| {
            path_utils::starts_with_segments(normalized, &root.path)
                || path_utils::starts_with_segments(normalized, &root.canonical)
        })
    }

    /// Containment for fully dereferenced paths.
    fn contains_real(&self, normalized: &Path) -> bool {
        self.roots
            .iter()
            .any(|root| path_utils::starts_with_segments(normalized, &root.canonical))
    }

    /// Resolves a caller-supplied path string to a canonical path inside
    /// the sandbox, or rejects it. A leading `~` is expanded first; the rest
    /// is [`AllowedRoots::resolve_path`].
    pub fn resolve(&self, requested: &str) -> Result<PathBuf> {
        self.resolve_path(&path_utils::expand_home(requested))
    }

    /// Path-typed resolution, for callers that already hold a real `Path`
    /// (a directory-walk entry, for instance) where lossy string conversion
    /// would corrupt non-unicode names into paths that do not exist.
    ///
    /// Existing targets come back fully symlink-resolved. A target whose
    /// leaf does not exist yet resolves to the literal normalized candidate,
    /// provided its parent directory exists and dereferences inside a root —
    /// this is what allows creating genuinely new files and directories.
    pub fn resolve_path(&self, requested: &Path) -> Result<PathBuf> {
        let requested_normalized = normalize_requested(requested)?;

        if !self.contains_requested(&requested_normalized) {
            return Err(Error::OutsideSandbox {
                path: requested_normalized,
            });
        }

        match requested_normalized.canonicalize() {
            Ok(real) => {
                let real = path_utils::normalize_lexical(&real);
                if !self.contains_real(&real) {
                    return Err(Error::SymlinkEscape {
                        path: requested_normalized,
                    });
                }
                Ok(real)
            }
            Err(_) => {
                let parent = requested_normalized.parent().ok_or_else(|| {
                    Error::ParentMissing {
                        path: requested_normalized.clone(),
                    }
                })?;
                let real_parent = parent.canonicalize().map_err(|_| Error::ParentMissing {
                    path: requested_normalized.clone(),
                })?;
                let real_parent = path_utils::normalize_lexical(&real_parent);
                if !self.contains_real(&real_parent) {
                    return Err(Error::ParentOutsideSandbox {
                        path: requested_normalized,
                    });
                }
                Ok(requested_normalized)
            }
        }
    }
}

/// Absolutizes a requested path against the CWD and lexically normalizes
/// it. No filesystem access beyond `current_dir`.
fn normalize_requested(requested: &Path) -> Result<PathBuf> {
    if requested.as_os_str().is_empty() {
        return Err(Error::InvalidPath("path is empty".to_string()));
    }
    let absolute = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        cwd.join(requested)
    };
    Ok(path_utils::normalize_lexical(&absolute))
}
