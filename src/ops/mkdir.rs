use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryResponse {
    pub path: PathBuf,
}

/// Recursive creation, idempotent when the directory already exists.
///
/// The resolver requires the immediate parent to exist, so at most the leaf
/// component is created here; `create_dir_all` keeps already-existing
/// targets from erroring.
pub fn create_directory(
    ctx: &Context,
    request: CreateDirectoryRequest,
) -> Result<CreateDirectoryResponse> {
    let path = ctx.resolve(&request.path)?;
    fs::create_dir_all(&path).map_err(|err| Error::io_path("create_dir_all", &path, err))?;
    Ok(CreateDirectoryResponse { path })
}
