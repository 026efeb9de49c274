//! The fuzzy multi-edit patch engine.
//!
//! Edits apply strictly in order, each against the output of the previous
//! one. Matching is progressively relaxed: exact substring first, then a
//! line-trimmed window match that re-infers indentation for the replacement.
//! The result is reported as a unified diff between the original and final
//! content, never edit-by-edit.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edit {
    #[serde(rename = "oldText")]
    pub old_text: String,
    #[serde(rename = "newText")]
    pub new_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditFileRequest {
    pub path: String,
    pub edits: Vec<Edit>,
    #[serde(default, rename = "dryRun")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditFileResponse {
    pub path: PathBuf,
    /// Fenced unified diff between the original and final content.
    pub diff: String,
    /// False for dry runs: the diff was computed but nothing was written.
    pub applied: bool,
}

pub fn apply_edits(ctx: &Context, request: EditFileRequest) -> Result<EditFileResponse> {
    let path = ctx.resolve(&request.path)?;

    let original = fs::read_to_string(&path)
        .map_err(|_| Error::FileUnreadable { path: path.clone() })?;
    let original = normalize_line_endings(&original);

    let mut content = original.clone();
    for edit in &request.edits {
        let old_text = normalize_line_endings(&edit.old_text);
        let new_text = normalize_line_endings(&edit.new_text);
        content = apply_one_edit(&content, &old_text, &new_text)?;
    }

    let diff = fenced_unified_diff(&original, &content);

    if !request.dry_run {
        fs::write(&path, content.as_bytes())
            .map_err(|err| Error::io_path("write", &path, err))?;
    }

    Ok(EditFileResponse {
        path,
        diff,
        applied: !request.dry_run,
    })
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Applies a single edit: exact substring replacement of the first
/// occurrence, falling back to a line-trimmed window match.
fn apply_one_edit(content: &str, old_text: &str, new_text: &str) -> Result<String> {
    if content.contains(old_text) {
        return Ok(content.replacen(old_text, new_text, 1));
    }

    let content_lines: Vec<&str> = content.split('\n').collect();
    let old_lines: Vec<&str> = old_text.split('\n').collect();

    let Some(window) = find_line_window(&content_lines, &old_lines) else {
        return Err(Error::EditNotApplicable {
            old_text: old_text.to_string(),
        });
    };

    let replacement = indent_replacement_lines(content_lines[window], &old_lines, new_text);

    let mut out: Vec<String> = Vec::with_capacity(
        content_lines.len() - old_lines.len() + replacement.len(),
    );
    out.extend(content_lines[..window].iter().map(|line| line.to_string()));
    out.extend(replacement);
    out.extend(
        content_lines[window + old_lines.len()..]
            .iter()
            .map(|line| line.to_string()),
    );
    Ok(out.join("\n"))
}

/// Earliest window of `old_lines.len()` content lines whose every line
/// equals the corresponding old line after trimming both sides.
pub(crate) fn find_line_window(content_lines: &[&str], old_lines: &[&str]) -> Option<usize> {
    if old_lines.is_empty() || old_lines.len() > content_lines.len() {
        return None;
    }
    (0..=content_lines.len() - old_lines.len()).find(|&start| {
        old_lines
            .iter()
            .enumerate()
            .all(|(offset, old_line)| content_lines[start + offset].trim() == old_line.trim())
    })
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Re-indents the replacement text against the matched window.
///
/// The first replacement line takes the window's original indentation.
/// Subsequent lines keep their indentation *relative* to the corresponding
/// old line, on top of the window's base indentation, so replacing an
/// unindented old text inside an indented window keeps the window's depth.
/// A line the edit deliberately dedents (the old line was indented, the new
/// one is not) passes through unchanged.
pub(crate) fn indent_replacement_lines(
    window_first_line: &str,
    old_lines: &[&str],
    new_text: &str,
) -> Vec<String> {
    let base_indent = leading_whitespace(window_first_line);
    new_text
        .split('\n')
        .enumerate()
        .map(|(idx, new_line)| {
            if idx == 0 {
                return format!("{base_indent}{}", new_line.trim_start());
            }
            let old_indent_len = old_lines
                .get(idx)
                .map(|line| leading_whitespace(line).len())
                .unwrap_or(0);
            let new_indent_len = leading_whitespace(new_line).len();
            if new_indent_len == 0 && old_indent_len > 0 {
                return new_line.to_string();
            }
            let extra = new_indent_len.saturating_sub(old_indent_len);
            format!(
                "{base_indent}{}{}",
                " ".repeat(extra),
                new_line.trim_start()
            )
        })
        .collect()
}

/// Unified diff (3 context lines) wrapped in a backtick fence that is always
/// longer than any backtick run inside the diff body, so diff content can
/// never terminate the fence early.
pub(crate) fn fenced_unified_diff(original: &str, modified: &str) -> String {
    let diff = diffy::create_patch(original, modified).to_string();

    let longest_run = diff
        .split(|ch| ch != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest_run + 1).max(3));

    let newline = if diff.ends_with('\n') { "" } else { "\n" };
    format!("{fence}diff\n{diff}{newline}{fence}\n")
}
