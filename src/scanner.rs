//! Comment detection over a commit's diff
//!
//! The scanner walks the added lines of each file patch and classifies every
//! one as non-comment, whole-line comment, or code carrying a trailing
//! inline comment, using the file's [`CommentSyntax`] profile. Block-comment
//! state is tracked per file across hunks; it never crosses file boundaries.
//!
//! Only added lines are inspected. Deleted and context lines are invisible
//! to classification, which is what scopes removal to comments the HEAD
//! commit introduced.

use std::collections::BTreeMap;
use std::path::Path;

use crate::diff::{self, DiffParseError, FilePatch, LineKind};
use crate::language::{CommentSyntax, Language};
use crate::string_utils::inside_string_literal;

/// One added line that contains a comment to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOccurrence {
    /// File path relative to the repository root.
    pub path: String,
    /// 1-based line number in the post-image of the file.
    pub line_number: u32,
    /// The raw line text as it appeared in the diff.
    pub text: String,
    /// True when code precedes the comment marker on this line; false when
    /// the entire line is comment (possibly behind leading whitespace).
    pub is_inline: bool,
}

/// Block-comment scan state, reset at the start of each file.
///
/// The start marker that opened the current block is kept as its index into
/// the profile's `block_start` list, so the closing line can be matched
/// against the paired end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    NotInBlock,
    InBlock(usize),
}

/// Outcome of block-comment classification for one line.
struct BlockVerdict {
    /// `Some(is_inline)` when the line is part of a block comment.
    comment: Option<bool>,
    next_state: BlockState,
}

/// Scan a unified-diff document for comments on added lines.
///
/// Returns occurrences grouped by file path, ordered by path and, within a
/// file, by ascending post-image line number. Files with no recognized
/// language and pure deletions contribute nothing. Malformed diff input is
/// a fatal error; there are no partial results.
pub fn scan(diff_text: &str) -> Result<BTreeMap<String, Vec<CommentOccurrence>>, DiffParseError> {
    let patches = diff::parse(diff_text)?;
    let mut by_file = BTreeMap::new();

    for patch in &patches {
        if patch.is_deleted {
            continue;
        }
        let Some(language) = Language::from_path(Path::new(&patch.path)) else {
            continue;
        };

        let occurrences = scan_file(patch, language.comment_syntax());
        if !occurrences.is_empty() {
            by_file.insert(patch.path.clone(), occurrences);
        }
    }

    Ok(by_file)
}

/// Scan one file's added lines, carrying block state across its hunks.
fn scan_file(patch: &FilePatch, syntax: &CommentSyntax) -> Vec<CommentOccurrence> {
    let mut found = Vec::new();
    let mut state = BlockState::NotInBlock;

    for hunk in &patch.hunks {
        for line in &hunk.lines {
            if line.kind != LineKind::Added {
                continue;
            }
            let Some(line_number) = line.new_lineno else {
                continue;
            };

            // Block handling takes precedence; a block match on a line
            // suppresses single-line marker scanning for it.
            if syntax.has_block_markers() {
                let verdict = classify_block(&line.text, syntax, state);
                state = verdict.next_state;
                if let Some(is_inline) = verdict.comment {
                    found.push(CommentOccurrence {
                        path: patch.path.clone(),
                        line_number,
                        text: line.text.clone(),
                        is_inline,
                    });
                    continue;
                }
            }

            if !syntax.single_line.is_empty() {
                if let Some(is_inline) = classify_single_line(&line.text, syntax) {
                    found.push(CommentOccurrence {
                        path: patch.path.clone(),
                        line_number,
                        text: line.text.clone(),
                        is_inline,
                    });
                }
            }
        }
    }

    found
}

/// Classify a line against the block-comment markers.
///
/// Inside a block, the paired end marker anywhere on the line closes it and
/// the line is still wholly comment; otherwise the line is comment content
/// and the block stays open. Outside a block, the first configured start
/// marker found wins: when the paired end marker is also contained in the
/// line the block opens and closes in place (inline when code precedes the
/// start marker), otherwise the line is recorded whole-line and the block
/// opens. Note the close test is containment, not ordered-after: for
/// identical start/end markers such as `"""` a lone occurrence counts as
/// opening and closing on the same line.
fn classify_block(line: &str, syntax: &CommentSyntax, state: BlockState) -> BlockVerdict {
    let stripped = line.trim();

    if let BlockState::InBlock(start_idx) = state {
        let closes = syntax
            .paired_end(start_idx)
            .is_some_and(|end| stripped.contains(end));
        return BlockVerdict {
            comment: Some(false),
            next_state: if closes {
                BlockState::NotInBlock
            } else {
                BlockState::InBlock(start_idx)
            },
        };
    }

    for (idx, start) in syntax.block_start.iter().enumerate() {
        let Some(at) = stripped.find(start) else {
            continue;
        };
        let closes_here = syntax
            .paired_end(idx)
            .is_some_and(|end| stripped.contains(end));
        if closes_here {
            let is_inline = !stripped[..at].trim().is_empty();
            return BlockVerdict {
                comment: Some(is_inline),
                next_state: BlockState::NotInBlock,
            };
        }
        // The block stays open past this line. Recorded whole-line even if
        // code precedes the start marker; tracking that prefix is a known
        // gap in the line-oriented model.
        return BlockVerdict {
            comment: Some(false),
            next_state: BlockState::InBlock(idx),
        };
    }

    BlockVerdict {
        comment: None,
        next_state: BlockState::NotInBlock,
    }
}

/// Classify a line against the single-line markers.
///
/// Returns `Some(is_inline)` when the line carries a comment, `None`
/// otherwise. Markers are tried in configured order; a marker whose prefix
/// fails the string-literal parity check is skipped in favor of the next.
fn classify_single_line(line: &str, syntax: &CommentSyntax) -> Option<bool> {
    let stripped = line.trim();
    if stripped.is_empty() {
        return None;
    }

    for marker in syntax.single_line {
        let Some(at) = stripped.find(marker) else {
            continue;
        };
        if at == 0 {
            return Some(false);
        }

        let prefix = &stripped[..at];
        if inside_string_literal(prefix) {
            continue;
        }
        return Some(!prefix.trim().is_empty());
    }

    None
}
