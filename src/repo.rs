//! Git repository validation and HEAD diff extraction
//!
//! The scanner and rewriter trust two preconditions that are enforced
//! here before anything runs: the process sits at the root of a git
//! repository, and the working tree is pristine. A dirty tree would let a
//! rewrite clobber uncommitted work, so validation aborts with the exact
//! offending paths instead.

use std::path::{Path, PathBuf};

use git2::{DiffFormat, DiffOptions, ErrorCode, Repository, Status, StatusOptions};
use thiserror::Error;

/// Raised when repository validation or diff retrieval fails.
#[derive(Debug, Error)]
pub enum GitValidationError {
    #[error("not in a git repository; run this from within a git repository")]
    NotARepository,

    #[error(
        "must be run from the repository root\n\
         current directory: {current}\n\
         repository root:   {root}"
    )]
    NotAtRoot { current: PathBuf, root: PathBuf },

    #[error("working tree is not clean; commit or stash your changes first\n{details}")]
    DirtyTree { details: String },

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// An opened repository whose working directory is the current directory.
pub struct Workspace {
    repo: Repository,
    root: PathBuf,
}

impl Workspace {
    /// Discover the repository containing `cwd` and require `cwd` to be
    /// its working-tree root.
    pub fn open_at_root(cwd: &Path) -> Result<Self, GitValidationError> {
        let repo = Repository::discover(cwd).map_err(|_| GitValidationError::NotARepository)?;
        let root = repo
            .workdir()
            .ok_or(GitValidationError::NotARepository)?
            .to_path_buf();

        let current = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
        let root_canonical = root.canonicalize().unwrap_or_else(|_| root.clone());
        if current != root_canonical {
            return Err(GitValidationError::NotAtRoot {
                current,
                root: root_canonical,
            });
        }

        Ok(Self { repo, root })
    }

    /// The working-tree root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Require a pristine working tree.
    ///
    /// Untracked, modified-but-unstaged, and staged-but-uncommitted paths
    /// all count as dirty and are enumerated in the error.
    pub fn ensure_clean(&self) -> Result<(), GitValidationError> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;

        let mut untracked = Vec::new();
        let mut modified = Vec::new();
        let mut staged = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();
            let path = entry.path().unwrap_or("<non-utf8 path>").to_string();

            if status.contains(Status::WT_NEW) {
                untracked.push(path);
                continue;
            }
            if status.intersects(
                Status::WT_MODIFIED | Status::WT_DELETED | Status::WT_TYPECHANGE | Status::WT_RENAMED,
            ) {
                modified.push(path.clone());
            }
            if status.intersects(
                Status::INDEX_NEW
                    | Status::INDEX_MODIFIED
                    | Status::INDEX_DELETED
                    | Status::INDEX_RENAMED
                    | Status::INDEX_TYPECHANGE,
            ) {
                staged.push(path);
            }
        }

        if untracked.is_empty() && modified.is_empty() && staged.is_empty() {
            return Ok(());
        }

        let mut details = Vec::new();
        if !untracked.is_empty() {
            details.push(format!("untracked files: {}", untracked.join(", ")));
        }
        if !modified.is_empty() {
            details.push(format!("modified files: {}", modified.join(", ")));
        }
        if !staged.is_empty() {
            details.push(format!("staged files: {}", staged.join(", ")));
        }
        Err(GitValidationError::DirtyTree {
            details: details.join("\n"),
        })
    }

    /// The unified diff of the HEAD commit against its first parent, as
    /// patch text with 3 lines of context.
    ///
    /// The root commit diffs against the empty tree. A repository with no
    /// commits yet yields an empty string, which callers treat as a no-op.
    pub fn head_diff(&self) -> Result<String, GitValidationError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(String::new());
            }
            Err(e) => return Err(e.into()),
        };
        let commit = head.peel_to_commit()?;
        let new_tree = commit.tree()?;
        let old_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut options = DiffOptions::new();
        options.context_lines(3);
        let diff =
            self.repo
                .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut options))?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            // Content lines carry their origin as a separate field; file
            // and hunk headers arrive with the marker already in content.
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(text)
    }
}
