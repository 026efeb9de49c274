use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFileRequest {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFileResponse {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Full overwrite with a single whole-file write; creates the file if it
/// does not exist. The resolver already guarantees the parent directory
/// exists inside the sandbox.
pub fn write_file(ctx: &Context, request: WriteFileRequest) -> Result<WriteFileResponse> {
    let path = ctx.resolve(&request.path)?;
    fs::write(&path, request.content.as_bytes())
        .map_err(|err| Error::io_path("write", &path, err))?;
    Ok(WriteFileResponse {
        path,
        bytes_written: request.content.len() as u64,
    })
}
