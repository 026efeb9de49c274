//! Recursive name search. Reuses the sandbox resolver on every visited
//! entry: a hostile or dangling symlink partway down the tree is skipped
//! silently instead of aborting the walk.

use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilesRequest {
    pub path: String,
    pub pattern: String,
    #[serde(default, rename = "excludePatterns")]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilesResponse {
    pub matches: Vec<PathBuf>,
}

fn compile_exclude_globs(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // A bare name means "everything under this name, anywhere".
        let expanded = if pattern.contains('*') {
            pattern.clone()
        } else {
            format!("**/{pattern}/**")
        };
        let glob = GlobBuilder::new(&expanded)
            .literal_separator(true)
            .build()
            .map_err(|err| Error::InvalidPath(format!("invalid exclude pattern: {err}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|err| Error::InvalidPath(format!("invalid exclude patterns: {err}")))
}

pub fn search_files(ctx: &Context, request: SearchFilesRequest) -> Result<SearchFilesResponse> {
    let root = ctx.resolve(&request.path)?;
    let excludes = compile_exclude_globs(&request.exclude_patterns)?;
    let needle = request.pattern.to_lowercase();

    let mut matches = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // Excluded entries are pruned together with their subtrees; an
        // excluded directory's descendants could never match the same
        // `**/name/**` pattern anyway.
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let Some(excludes) = excludes.as_ref() else {
                return true;
            };
            match entry.path().strip_prefix(&root) {
                Ok(relative) => !excludes.is_match(relative),
                Err(_) => false,
            }
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Partial-tree failures (permissions, dangling links) are
                // expected and must not abort discovery of the rest.
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        if let Err(err) = ctx.resolve_path(entry.path()) {
            tracing::debug!(
                path = %entry.path().display(),
                error = %err,
                "skipping unresolvable entry"
            );
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.contains(&needle) {
            matches.push(entry.path().to_path_buf());
        }
    }

    Ok(SearchFilesResponse { matches })
}
