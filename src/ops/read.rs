use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFileRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFileResponse {
    pub path: PathBuf,
    pub content: String,
}

pub fn read_file(ctx: &Context, request: ReadFileRequest) -> Result<ReadFileResponse> {
    let path = ctx.resolve(&request.path)?;
    let content =
        fs::read_to_string(&path).map_err(|err| Error::io_path("read", &path, err))?;
    Ok(ReadFileResponse { path, content })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadMultipleFilesRequest {
    pub paths: Vec<String>,
}

/// One requested path's outcome. Failures stay inline so a single bad path
/// never aborts its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResult {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadMultipleFilesResponse {
    pub results: Vec<ReadResult>,
}

/// Upper bound on reader threads alive at once for a bulk read.
const MAX_CONCURRENT_READS: usize = 8;

/// Reads every requested path, each independently. Paths are read on their
/// own threads in bounded batches; results come back in request order.
pub fn read_multiple_files(
    ctx: &Context,
    request: ReadMultipleFilesRequest,
) -> Result<ReadMultipleFilesResponse> {
    let mut results = Vec::with_capacity(request.paths.len());
    for batch in request.paths.chunks(MAX_CONCURRENT_READS) {
        let batch_results: Vec<ReadResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|requested| {
                    scope.spawn(move || {
                        read_file(
                            ctx,
                            ReadFileRequest {
                                path: requested.clone(),
                            },
                        )
                    })
                })
                .collect();
            handles
                .into_iter()
                .zip(batch)
                .map(|(handle, requested)| {
                    let outcome = handle.join().unwrap_or_else(|_| {
                        Err(Error::InvalidPath("read thread panicked".into()))
                    });
                    match outcome {
                        Ok(response) => ReadResult {
                            path: requested.clone(),
                            content: Some(response.content),
                            error: None,
                        },
                        Err(err) => ReadResult {
                            path: requested.clone(),
                            content: None,
                            error: Some(err.to_string()),
                        },
                    }
                })
                .collect()
        });
        results.extend(batch_results);
    }
    Ok(ReadMultipleFilesResponse { results })
}
