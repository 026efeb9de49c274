use std::path::PathBuf;

use crate::error::Result;
use crate::sandbox::AllowedRoots;

mod edit;
mod list_dir;
mod mkdir;
mod move_path;
mod read;
mod search;
mod stat;
mod write;

pub use edit::{apply_edits, Edit, EditFileRequest, EditFileResponse};
pub use list_dir::{
    list_directory, DirEntryKind, ListDirectoryEntry, ListDirectoryRequest, ListDirectoryResponse,
};
pub use mkdir::{create_directory, CreateDirectoryRequest, CreateDirectoryResponse};
pub use move_path::{move_file, MoveFileRequest, MoveFileResponse};
pub use read::{
    read_file, read_multiple_files, ReadFileRequest, ReadFileResponse, ReadMultipleFilesRequest,
    ReadMultipleFilesResponse, ReadResult,
};
pub use search::{search_files, SearchFilesRequest, SearchFilesResponse};
pub use stat::{get_file_info, GetFileInfoRequest, GetFileInfoResponse};
pub use write::{write_file, WriteFileRequest, WriteFileResponse};


/// Shared per-process state: the immutable allowed-root set.
///
/// Each request resolves its own paths and performs its own I/O; nothing
/// here is mutated after startup, so a `Context` can be shared freely across
/// concurrent requests.
#[derive(Debug)]
pub struct Context {
    roots: AllowedRoots,
}

impl Context {
    pub fn new(roots: AllowedRoots) -> Self {
        Self { roots }
    }

    pub fn allowed_roots(&self) -> &AllowedRoots {
        &self.roots
    }

    pub(crate) fn resolve(&self, requested: &str) -> Result<PathBuf> {
        self.roots.resolve(requested)
    }

    pub(crate) fn resolve_path(&self, requested: &std::path::Path) -> Result<PathBuf> {
        self.roots.resolve_path(requested)
    }
}
