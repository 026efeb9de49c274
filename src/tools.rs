//! Tool-call dispatch: a closed set of operation kinds, each carrying its
//! typed argument struct, matched exhaustively. The transport hands us a
//! wire-shaped request; we hand back the textual payload the protocol
//! expects, or an error message the transport marks as such.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ops::{self, Context};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolRequest {
    ReadFile(ops::ReadFileRequest),
    ReadMultipleFiles(ops::ReadMultipleFilesRequest),
    WriteFile(ops::WriteFileRequest),
    EditFile(ops::EditFileRequest),
    CreateDirectory(ops::CreateDirectoryRequest),
    ListDirectory(ops::ListDirectoryRequest),
    MoveFile(ops::MoveFileRequest),
    SearchFiles(ops::SearchFilesRequest),
    GetFileInfo(ops::GetFileInfoRequest),
    ListAllowedDirectories,
}

impl ToolRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadFile(_) => "read_file",
            Self::ReadMultipleFiles(_) => "read_multiple_files",
            Self::WriteFile(_) => "write_file",
            Self::EditFile(_) => "edit_file",
            Self::CreateDirectory(_) => "create_directory",
            Self::ListDirectory(_) => "list_directory",
            Self::MoveFile(_) => "move_file",
            Self::SearchFiles(_) => "search_files",
            Self::GetFileInfo(_) => "get_file_info",
            Self::ListAllowedDirectories => "list_allowed_directories",
        }
    }
}

/// Runs one tool call and renders its textual payload.
pub fn dispatch(ctx: &Context, request: ToolRequest) -> Result<String> {
    match request {
        ToolRequest::ReadFile(args) => {
            let response = ops::read_file(ctx, args)?;
            Ok(response.content)
        }
        ToolRequest::ReadMultipleFiles(args) => {
            let response = ops::read_multiple_files(ctx, args)?;
            let sections: Vec<String> = response
                .results
                .into_iter()
                .map(|result| match (result.content, result.error) {
                    (Some(content), _) => format!("{}:\n{content}\n", result.path),
                    (None, Some(error)) => format!("{}: Error - {error}", result.path),
                    (None, None) => format!("{}: Error - unknown failure", result.path),
                })
                .collect();
            Ok(sections.join("\n---\n"))
        }
        ToolRequest::WriteFile(args) => {
            let requested = args.path.clone();
            ops::write_file(ctx, args)?;
            Ok(format!("Successfully wrote to {requested}"))
        }
        ToolRequest::EditFile(args) => {
            let response = ops::apply_edits(ctx, args)?;
            Ok(response.diff)
        }
        ToolRequest::CreateDirectory(args) => {
            let requested = args.path.clone();
            ops::create_directory(ctx, args)?;
            Ok(format!("Successfully created directory {requested}"))
        }
        ToolRequest::ListDirectory(args) => {
            let response = ops::list_directory(ctx, args)?;
            let lines: Vec<String> = response
                .entries
                .into_iter()
                .map(|entry| match entry.kind {
                    ops::DirEntryKind::Dir => format!("[DIR] {}", entry.name),
                    ops::DirEntryKind::File => format!("[FILE] {}", entry.name),
                })
                .collect();
            Ok(lines.join("\n"))
        }
        ToolRequest::MoveFile(args) => {
            let (from, to) = (args.source.clone(), args.destination.clone());
            ops::move_file(ctx, args)?;
            Ok(format!("Successfully moved {from} to {to}"))
        }
        ToolRequest::SearchFiles(args) => {
            let response = ops::search_files(ctx, args)?;
            if response.matches.is_empty() {
                Ok("No matches found".to_string())
            } else {
                let lines: Vec<String> = response
                    .matches
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect();
                Ok(lines.join("\n"))
            }
        }
        ToolRequest::GetFileInfo(args) => {
            let info = ops::get_file_info(ctx, args)?;
            let millis = |value: Option<u64>| {
                value.map_or_else(|| "-".to_string(), |ms| ms.to_string())
            };
            Ok(format!(
                "size: {}\ncreated: {}\nmodified: {}\naccessed: {}\nisDirectory: {}\nisFile: {}\npermissions: {}",
                info.size_bytes,
                millis(info.created_ms),
                millis(info.modified_ms),
                millis(info.accessed_ms),
                info.is_directory,
                info.is_file,
                info.permissions,
            ))
        }
        ToolRequest::ListAllowedDirectories => {
            let roots: Vec<String> = ctx
                .allowed_roots()
                .roots()
                .iter()
                .map(|root| root.display().to_string())
                .collect();
            Ok(format!("Allowed directories:\n{}", roots.join("\n")))
        }
    }
}

/// Wire response: the rendered payload plus an error flag for the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: String,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

/// Like [`dispatch`], but errors become a textual payload instead of a
/// protocol-level fault.
pub fn dispatch_to_response(ctx: &Context, request: ToolRequest) -> ToolResponse {
    match dispatch(ctx, request) {
        Ok(content) => ToolResponse {
            content,
            is_error: false,
        },
        Err(err) => ToolResponse {
            content: format!("Error: {err}"),
            is_error: true,
        },
    }
}
