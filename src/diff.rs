//! Minimal unified-diff reader
//!
//! Parses the textual patch of one commit into per-file patches, hunks, and
//! tagged lines carrying post-image line numbers. The reader knows nothing
//! about languages or comments; it exists so the scanner can consume a
//! well-defined structure instead of raw patch text.
//!
//! The accepted input is `git diff`/`git show` style output: optional
//! `diff --git` and extended header lines, `---`/`+++` file headers,
//! `@@ -a,b +c,d @@` hunk headers, and hunk body lines prefixed with `+`,
//! `-`, or a space. Binary-file notices and `\ No newline at end of file`
//! markers are tolerated and skipped.

use thiserror::Error;

/// Error raised when a diff document cannot be parsed.
///
/// There is no partial-recovery mode: a malformed document aborts the whole
/// scan before anything is applied.
#[derive(Debug, Error)]
pub enum DiffParseError {
    #[error("malformed hunk header at diff line {line}: {text:?}")]
    BadHunkHeader { line: usize, text: String },
    #[error("hunk body at diff line {line} has unknown leader: {text:?}")]
    BadHunkLine { line: usize, text: String },
    #[error("diff line {line} appears outside any file patch: {text:?}")]
    OrphanLine { line: usize, text: String },
}

/// How one patch line relates to the pre- and post-image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

/// One tagged line inside a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLine {
    pub kind: LineKind,
    /// Line content without the leader character or trailing newline.
    pub text: String,
    /// 1-based line number in the post-image; `None` for removed lines.
    pub new_lineno: Option<u32>,
}

/// A contiguous block of changes from one `@@` region.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Hunk {
    pub lines: Vec<PatchLine>,
}

/// All hunks of one file in the commit's patch.
#[derive(Debug, PartialEq, Eq)]
pub struct FilePatch {
    /// Post-image path, relative to the repository root (`b/` stripped).
    /// For deletions this is the pre-image path.
    pub path: String,
    /// The file no longer exists in the post-image (`+++ /dev/null`).
    pub is_deleted: bool,
    pub hunks: Vec<Hunk>,
}

impl FilePatch {
    fn new(path: String) -> Self {
        Self {
            path,
            is_deleted: false,
            hunks: Vec::new(),
        }
    }
}

/// Strip the conventional `a/` or `b/` prefix from a diff header path.
fn strip_diff_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}

/// Parse `@@ -a[,b] +c[,d] @@ ...` into (old_count, new_start, new_count).
fn parse_hunk_header(header: &str) -> Option<(u32, u32, u32)> {
    let rest = header.strip_prefix("@@ -")?;
    let (old_part, rest) = rest.split_once(' ')?;
    let (new_part, _) = rest.strip_prefix('+')?.split_once(" @@")?;

    let parse_range = |part: &str| -> Option<(u32, u32)> {
        match part.split_once(',') {
            Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
            None => Some((part.parse().ok()?, 1)),
        }
    };

    let (_, old_count) = parse_range(old_part)?;
    let (new_start, new_count) = parse_range(new_part)?;
    Some((old_count, new_start, new_count))
}

/// Header-level lines that may appear between `diff --git` and the first
/// hunk (or in place of hunks, for binary and metadata-only changes).
fn is_extended_header(line: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "index ",
        "mode ",
        "new file mode",
        "deleted file mode",
        "old mode",
        "new mode",
        "similarity index",
        "dissimilarity index",
        "rename from",
        "rename to",
        "copy from",
        "copy to",
        "Binary files",
        "GIT binary patch",
    ];
    PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Parse a unified-diff document into per-file patches.
///
/// Post-image line numbers are assigned to added and context lines by
/// counting from each hunk header's `+c` start.
pub fn parse(diff_text: &str) -> Result<Vec<FilePatch>, DiffParseError> {
    let mut patches: Vec<FilePatch> = Vec::new();
    let mut current: Option<FilePatch> = None;
    // Remaining (old, new) line counts of the hunk being consumed.
    let mut remaining: Option<(u32, u32)> = None;
    let mut next_new_lineno: u32 = 0;

    for (idx, raw) in diff_text.lines().enumerate() {
        let lineno = idx + 1;

        if let (Some((old_left, new_left)), Some(hunk)) = (
            remaining,
            current.as_mut().and_then(|p| p.hunks.last_mut()),
        ) {
            if old_left > 0 || new_left > 0 {
                if let Some(text) = raw.strip_prefix('+') {
                    hunk.lines.push(PatchLine {
                        kind: LineKind::Added,
                        text: text.to_string(),
                        new_lineno: Some(next_new_lineno),
                    });
                    next_new_lineno += 1;
                    remaining = Some((old_left, new_left.saturating_sub(1)));
                } else if let Some(text) = raw.strip_prefix('-') {
                    hunk.lines.push(PatchLine {
                        kind: LineKind::Removed,
                        text: text.to_string(),
                        new_lineno: None,
                    });
                    remaining = Some((old_left.saturating_sub(1), new_left));
                } else if raw.starts_with('\\') {
                    // "\ No newline at end of file" - metadata, not content
                } else if raw.is_empty() || raw.starts_with(' ') {
                    // Context line; a fully empty line is an empty context
                    // line whose leading space was trimmed in transit.
                    hunk.lines.push(PatchLine {
                        kind: LineKind::Context,
                        text: raw.strip_prefix(' ').unwrap_or(raw).to_string(),
                        new_lineno: Some(next_new_lineno),
                    });
                    next_new_lineno += 1;
                    remaining = Some((old_left.saturating_sub(1), new_left.saturating_sub(1)));
                } else {
                    return Err(DiffParseError::BadHunkLine {
                        line: lineno,
                        text: raw.to_string(),
                    });
                }
                continue;
            }
            remaining = None;
        }

        if let Some(header) = raw.strip_prefix("diff --git ") {
            if let Some(patch) = current.take() {
                patches.push(patch);
            }
            // Path from the "b/..." half; refined by the +++ header below.
            let path = header
                .rsplit(' ')
                .next()
                .map(strip_diff_prefix)
                .unwrap_or_default()
                .to_string();
            current = Some(FilePatch::new(path));
        } else if let Some(old_path) = raw.strip_prefix("--- ") {
            // A bare "---" header opens a file patch when no "diff --git"
            // line preceded it (plain `diff -u` style documents).
            let needs_new = current.as_ref().is_none_or(|p| !p.hunks.is_empty());
            if needs_new {
                if let Some(patch) = current.take() {
                    patches.push(patch);
                }
                current = Some(FilePatch::new(
                    strip_diff_prefix(old_path.trim_end()).to_string(),
                ));
            }
        } else if let Some(new_path) = raw.strip_prefix("+++ ") {
            let patch = current
                .as_mut()
                .ok_or_else(|| DiffParseError::OrphanLine {
                    line: lineno,
                    text: raw.to_string(),
                })?;
            let new_path = new_path.trim_end();
            if new_path == "/dev/null" {
                patch.is_deleted = true;
            } else {
                patch.path = strip_diff_prefix(new_path).to_string();
            }
        } else if raw.starts_with("@@ ") {
            let patch = current
                .as_mut()
                .ok_or_else(|| DiffParseError::OrphanLine {
                    line: lineno,
                    text: raw.to_string(),
                })?;
            let (old_count, new_start, new_count) =
                parse_hunk_header(raw).ok_or_else(|| DiffParseError::BadHunkHeader {
                    line: lineno,
                    text: raw.to_string(),
                })?;
            patch.hunks.push(Hunk::default());
            remaining = Some((old_count, new_count));
            next_new_lineno = new_start;
        } else if raw.is_empty() || raw.starts_with('\\') || is_extended_header(raw) {
            // Blank separators, trailing no-newline markers, and extended
            // headers carry no content.
        } else if current.is_none() {
            return Err(DiffParseError::OrphanLine {
                line: lineno,
                text: raw.to_string(),
            });
        } else {
            return Err(DiffParseError::BadHunkLine {
                line: lineno,
                text: raw.to_string(),
            });
        }
    }

    if let Some(patch) = current.take() {
        patches.push(patch);
    }
    Ok(patches)
}
