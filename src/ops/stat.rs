use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFileInfoRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFileInfoResponse {
    pub path: PathBuf,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_ms: Option<u64>,
    pub is_directory: bool,
    pub is_file: bool,
    /// Last three octal digits of the permission bits.
    pub permissions: String,
}

fn system_time_to_millis(value: std::time::SystemTime) -> Option<u64> {
    value
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
}

fn metadata_time_to_millis(
    path: &std::path::Path,
    op: &'static str,
    value: std::io::Result<std::time::SystemTime>,
) -> Result<Option<u64>> {
    match value {
        Ok(time) => Ok(system_time_to_millis(time)),
        Err(err) if err.kind() == ErrorKind::Unsupported => Ok(None),
        Err(err) => Err(Error::io_path(op, path, err)),
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", meta.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> String {
    if meta.permissions().readonly() {
        "444".to_string()
    } else {
        "666".to_string()
    }
}

pub fn get_file_info(ctx: &Context, request: GetFileInfoRequest) -> Result<GetFileInfoResponse> {
    let path = ctx.resolve(&request.path)?;

    let meta = fs::metadata(&path).map_err(|err| Error::io_path("metadata", &path, err))?;

    let created_ms = metadata_time_to_millis(&path, "metadata.created", meta.created())?;
    let modified_ms = metadata_time_to_millis(&path, "metadata.modified", meta.modified())?;
    let accessed_ms = metadata_time_to_millis(&path, "metadata.accessed", meta.accessed())?;

    Ok(GetFileInfoResponse {
        size_bytes: meta.len(),
        created_ms,
        modified_ms,
        accessed_ms,
        is_directory: meta.is_dir(),
        is_file: meta.is_file(),
        permissions: permission_bits(&meta),
        path,
    })
}
