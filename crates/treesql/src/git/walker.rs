//! Lazy walk over the files of every commit in history.
//!
//! Commits come from a `git2::Revwalk` sorted topologically and by time, newest
//! first. When a commit is reached its tree is enumerated in pre-order (git's
//! own entry order, a subtree's files following the subtree entry) and every
//! blob becomes one [`FileTuple`]. Only one commit's file list is buffered at a
//! time.

use crate::error::{Result, TreesqlError};
use git2::{ObjectType, Oid, Repository, Revwalk, TreeWalkMode, TreeWalkResult};
use std::collections::VecDeque;

/// A file present in one commit's snapshot.
///
/// The tuple carries ids only; content is read on demand through
/// [`crate::GitRepo::blob_content`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTuple {
    /// Hex id of the commit whose snapshot contains the file.
    pub commit_id: String,
    /// Path of the directory holding the file, `""` at the tree root.
    pub parent_path: String,
    pub name: String,
    pub file_id: Oid,
}

impl FileTuple {
    /// Full path of the file inside the snapshot.
    pub fn path(&self) -> String {
        join_path(&self.parent_path, &self.name)
    }
}

/// Joins a tree walk root (which may carry a trailing `/`) with an entry name.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Iterator over `(commit, file)` tuples. `None` means the history is
/// exhausted; errors are yielded as `Some(Err(_))`.
pub struct HistoryWalker<'repo> {
    repo: &'repo Repository,
    revwalk: Option<Revwalk<'repo>>,
    pending: VecDeque<FileTuple>,
}

impl<'repo> HistoryWalker<'repo> {
    pub(crate) fn new(repo: &'repo Repository, revwalk: Revwalk<'repo>) -> Self {
        Self {
            repo,
            revwalk: Some(revwalk),
            pending: VecDeque::new(),
        }
    }

    /// A walker over a repository without commits.
    pub(crate) fn empty(repo: &'repo Repository) -> Self {
        Self {
            repo,
            revwalk: None,
            pending: VecDeque::new(),
        }
    }

    fn load_commit(&mut self, oid: Oid) -> Result<()> {
        let commit = self.repo.find_commit(oid).map_err(TreesqlError::Walker)?;
        let tree = commit.tree().map_err(TreesqlError::Walker)?;
        let commit_id = oid.to_string();

        let pending = &mut self.pending;
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                pending.push_back(FileTuple {
                    commit_id: commit_id.clone(),
                    parent_path: root.to_string(),
                    name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                    file_id: entry.id(),
                });
            }
            TreeWalkResult::Ok
        })
        .map_err(TreesqlError::Walker)?;

        Ok(())
    }
}

impl Iterator for HistoryWalker<'_> {
    type Item = Result<FileTuple>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending.pop_front() {
                return Some(Ok(file));
            }

            let oid = match self.revwalk.as_mut()?.next()? {
                Ok(oid) => oid,
                Err(e) => return Some(Err(TreesqlError::Walker(e))),
            };

            // A commit with an empty tree yields nothing; keep walking.
            if let Err(e) = self.load_commit(oid) {
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path_root() {
        assert_eq!(join_path("", "a.txt"), "a.txt");
    }

    #[test]
    fn test_join_path_nested() {
        assert_eq!(join_path("src/", "main.rs"), "src/main.rs");
        assert_eq!(join_path("src/bin", "cli.rs"), "src/bin/cli.rs");
        assert_eq!(join_path("a/b/", "c"), "a/b/c");
    }

    #[test]
    fn test_tuple_path() {
        let tuple = FileTuple {
            commit_id: "0".repeat(40),
            parent_path: "docs/".to_string(),
            name: "README.md".to_string(),
            file_id: Oid::zero(),
        };
        assert_eq!(tuple.path(), "docs/README.md");
    }
}
