use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileResponse {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Renames `source` to `destination`, refusing to overwrite.
///
/// Cross-device renames are not emulated; the underlying `EXDEV` surfaces
/// as the rename error.
pub fn move_file(ctx: &Context, request: MoveFileRequest) -> Result<MoveFileResponse> {
    let source = ctx.resolve(&request.source)?;
    let destination = ctx.resolve(&request.destination)?;

    match fs::symlink_metadata(&destination) {
        Ok(_) => return Err(Error::DestinationExists(destination)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(Error::io_path("metadata", &destination, err)),
    }

    fs::rename(&source, &destination)
        .map_err(|err| Error::io_path("rename", &destination, err))?;

    Ok(MoveFileResponse {
        source,
        destination,
    })
}
