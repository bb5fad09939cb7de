use git2::{Delta, DiffOptions, ErrorCode, Repository, Tree};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Supplier of `git diff --name-status` style text
pub trait DiffSource {
    /// One `<status>\t<path>` line per changed file
    fn name_status(&self) -> Result<String, GitError>;
}

/// Diff between two revisions of a repository.
///
/// Rename detection is left off, so a rename shows up as a delete and an add.
pub struct RevisionRange {
    repo_dir: PathBuf,
    compare: String,
    branch: String,
}

impl RevisionRange {
    /// `compare` is the existing revision, `branch` holds the changes to ship
    pub fn new(
        repo_dir: impl Into<PathBuf>,
        compare: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            compare: compare.into(),
            branch: branch.into(),
        }
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.repo_dir).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepo(self.repo_dir.display().to_string()),
            _ => GitError::GitOperationFailed(e),
        })
    }
}

impl DiffSource for RevisionRange {
    fn name_status(&self) -> Result<String, GitError> {
        let repo = self.open()?;
        let old_tree = peel_tree(&repo, &self.compare)?;
        let new_tree = peel_tree(&repo, &self.branch)?;

        let mut opts = DiffOptions::new();
        opts.include_typechange(true);

        let diff = repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))?;

        let mut text = String::new();
        let mut files_changed = 0usize;
        for delta in diff.deltas() {
            let file = match delta.status() {
                Delta::Deleted => delta.old_file(),
                _ => delta.new_file(),
            };
            let Some(path) = file.path_bytes() else {
                continue;
            };

            text.push(status_code(delta.status()));
            text.push('\t');
            text.push_str(&String::from_utf8_lossy(path));
            text.push('\n');
            files_changed += 1;
        }

        debug!(
            compare = %self.compare,
            branch = %self.branch,
            files_changed,
            "Captured name-status diff"
        );

        Ok(text)
    }
}

/// Pre-computed name-status output read from a file, or stdin for `-`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameStatusFile {
    Path(PathBuf),
    Stdin,
}

impl NameStatusFile {
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::Path(arg.to_path_buf())
        }
    }
}

impl DiffSource for NameStatusFile {
    fn name_status(&self) -> Result<String, GitError> {
        let text = match self {
            Self::Path(path) => std::fs::read_to_string(path)?,
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };

        debug!(bytes = text.len(), "Read name-status diff");

        Ok(text)
    }
}

fn peel_tree<'r>(repo: &'r Repository, revision: &str) -> Result<Tree<'r>, GitError> {
    let object = repo.revparse_single(revision).map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => {
            GitError::RevisionNotFound(revision.to_string())
        }
        _ => GitError::GitOperationFailed(e),
    })?;
    Ok(object.peel_to_tree()?)
}

/// Single-letter code matching `git diff --name-status`
fn status_code(delta: Delta) -> char {
    match delta {
        Delta::Added => 'A',
        Delta::Deleted => 'D',
        Delta::Modified => 'M',
        Delta::Renamed => 'R',
        Delta::Copied => 'C',
        Delta::Typechange => 'T',
        Delta::Conflicted => 'U',
        Delta::Unmodified | Delta::Ignored | Delta::Untracked | Delta::Unreadable => 'X',
    }
}
