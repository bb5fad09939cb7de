//! # sfpackage-git
//!
//! Sources of changed-file lists for sfpackage.
//!
//! ## Key Types
//!
//! - [`DiffSource`] - Anything that yields `git diff --name-status` text
//! - [`RevisionRange`] - Tree-to-tree diff of two revisions via libgit2
//! - [`NameStatusFile`] - Pre-computed output from a file or stdin
//!
//! ## Output Format
//!
//! One line per changed file, the status letter followed by a tab and the
//! repository-relative path:
//!
//! ```text
//! M	force-app/main/default/classes/Foo.cls
//! D	force-app/main/default/classes/Bar.cls
//! ```

mod diff;

pub use diff::{DiffSource, GitError, NameStatusFile, RevisionRange};
