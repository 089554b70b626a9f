//! File rewriting to drop detected comments
//!
//! The rewriter consumes the scanner's occurrences and edits files in
//! place: whole-line comments are deleted, inline comments are truncated at
//! the comment marker. The truncation point is re-derived from the current
//! on-disk line rather than the diff-captured text; under the clean-tree
//! precondition the two are identical, and re-deriving avoids trusting
//! stale offsets.
//!
//! Writes happen file by file with no transactional guarantees across the
//! set; a failed run leaves already-processed files in their rewritten
//! state.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::language::Language;
use crate::scanner::CommentOccurrence;
use crate::string_utils::inside_string_literal;

/// Result of applying occurrences to the working tree.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    /// Lines removed plus lines truncated, per file actually touched.
    pub changed: BTreeMap<String, usize>,
    /// Files referenced by occurrences but absent from disk; skipped with
    /// a warning and omitted from `changed`.
    pub missing: Vec<String>,
}

/// Apply comment occurrences to the files under `repo_root`.
///
/// Occurrences with line numbers outside the current file bounds are
/// silently ignored; a missing file is recorded in the outcome rather than
/// failing the run. I/O errors other than absence propagate.
pub fn apply(
    repo_root: &Path,
    by_file: &BTreeMap<String, Vec<CommentOccurrence>>,
) -> io::Result<ApplyOutcome> {
    let mut outcome = ApplyOutcome::default();

    for (path, occurrences) in by_file {
        let full_path = repo_root.join(path);
        if !full_path.exists() {
            outcome.missing.push(path.clone());
            continue;
        }

        let changed = rewrite_file(&full_path, path, occurrences)?;
        outcome.changed.insert(path.clone(), changed);
    }

    Ok(outcome)
}

/// Rewrite one file, returning the number of lines removed or truncated.
fn rewrite_file(
    full_path: &Path,
    rel_path: &str,
    occurrences: &[CommentOccurrence],
) -> io::Result<usize> {
    let bytes = fs::read(full_path)?;
    // Invalid sequences are replaced rather than failing the run.
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let single_line_markers = Language::from_path(Path::new(rel_path))
        .map(|language| language.comment_syntax().single_line)
        .unwrap_or(&[]);

    let mut to_remove: HashSet<usize> = HashSet::new();
    let mut to_truncate: HashMap<usize, String> = HashMap::new();

    for occurrence in occurrences {
        let Some(index) = (occurrence.line_number as usize).checked_sub(1) else {
            continue;
        };
        if index >= lines.len() {
            // The file changed between scan and apply; ignore rather than
            // mangle a line the occurrence no longer describes.
            continue;
        }

        if occurrence.is_inline {
            to_truncate.insert(index, truncate_inline(lines[index], single_line_markers));
        } else {
            to_remove.insert(index);
        }
    }

    let mut rebuilt = String::with_capacity(content.len());
    for (index, line) in lines.iter().enumerate() {
        if to_remove.contains(&index) {
            continue;
        }
        match to_truncate.get(&index) {
            Some(truncated) => rebuilt.push_str(truncated),
            None => rebuilt.push_str(line),
        }
    }
    fs::write(full_path, rebuilt)?;

    Ok(to_remove.len() + to_truncate.len())
}

/// Cut an inline comment off a line, keeping the code prefix.
///
/// The marker is located on the live line content with the same ordered
/// scan and string-literal parity check the scanner uses. When no
/// single-line marker matches, a `/* ... */` pair opened and closed on
/// this one line is spliced out instead. A line where neither applies is
/// returned unchanged.
fn truncate_inline(line: &str, single_line_markers: &[&str]) -> String {
    for marker in single_line_markers {
        let Some(at) = line.find(marker) else {
            continue;
        };
        if inside_string_literal(&line[..at]) {
            continue;
        }

        let mut cleaned = line[..at].trim_end().to_string();
        if line.ends_with('\n') {
            cleaned.push('\n');
        }
        return cleaned;
    }

    if let Some(start) = line.find("/*") {
        if !inside_string_literal(&line[..start]) {
            if let Some(end) = line[start..].find("*/").map(|rel| start + rel) {
                let prefix = line[..start].trim_end();
                let suffix = line[end + 2..].trim_start();
                let mut cleaned = format!("{prefix}{suffix}");
                if !cleaned.is_empty() && !cleaned.ends_with('\n') && line.ends_with('\n') {
                    cleaned.push('\n');
                }
                return cleaned;
            }
        }
    }

    line.to_string()
}
