use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid allowed roots: {0}")]
    InvalidRoots(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("access denied - path outside allowed directories: {path}")]
    OutsideSandbox { path: PathBuf },

    #[error("access denied - symlink target outside allowed directories: {path}")]
    SymlinkEscape { path: PathBuf },

    #[error("access denied - parent directory outside allowed directories: {path}")]
    ParentOutsideSandbox { path: PathBuf },

    #[error("parent directory does not exist: {path}")]
    ParentMissing { path: PathBuf },

    #[error("could not read file as text: {path}")]
    FileUnreadable { path: PathBuf },

    #[error("could not find exact match or line-trimmed match for edit:\n{old_text}")]
    EditNotApplicable { old_text: String },

    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("{op} failed for {path}: {source}")]
    IoPath {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io_path(
        op: &'static str,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        Self::IoPath {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
