use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirectoryRequest {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirEntryKind {
    Dir,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DirEntryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirectoryResponse {
    pub path: PathBuf,
    pub entries: Vec<ListDirectoryEntry>,
}

pub fn list_directory(
    ctx: &Context,
    request: ListDirectoryRequest,
) -> Result<ListDirectoryResponse> {
    let path = ctx.resolve(&request.path)?;

    let mut rows = fs::read_dir(&path)
        .map_err(|err| Error::io_path("read_dir", &path, err))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| Error::io_path("read_dir", &path, err))?;
    rows.sort_by_key(|entry| entry.file_name());

    let mut entries = Vec::with_capacity(rows.len());
    for entry in rows {
        let file_type = entry
            .file_type()
            .map_err(|err| Error::io_path("file_type", entry.path(), err))?;
        entries.push(ListDirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: if file_type.is_dir() {
                DirEntryKind::Dir
            } else {
                DirEntryKind::File
            },
        });
    }

    Ok(ListDirectoryResponse { path, entries })
}
