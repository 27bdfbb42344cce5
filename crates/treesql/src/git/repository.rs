//! Git repository wrapper for treesql.

use crate::error::{Result, TreesqlError};
use crate::git::walker::HistoryWalker;
use git2::{ErrorCode, Oid, Repository};
use std::path::Path;
use tracing::debug;

/// A wrapper around a Git repository providing the object lookups the
/// `git_files` table needs.
///
/// Every lookup acquires its `git2` object inside the calling method, so the
/// handle is dropped before the method returns, on error paths included.
///
/// # Example
///
/// ```no_run
/// use treesql::GitRepo;
///
/// let repo = GitRepo::open(".")?;
/// println!("Repository at: {}", repo.path());
/// # Ok::<(), treesql::TreesqlError>(())
/// ```
pub struct GitRepo {
    repo: Repository,
    path: String,
}

impl GitRepo {
    /// Opens the Git repository located exactly at `path`.
    ///
    /// Unlike discovery, parent directories are not searched: the configured
    /// location must itself be a repository (or its `.git` directory).
    ///
    /// # Errors
    ///
    /// Returns `TreesqlError::RepositoryOpen` if no repository is found.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let repo = Repository::open(path_ref).map_err(|source| TreesqlError::RepositoryOpen {
            path: path_ref.display().to_string(),
            source,
        })?;

        let workdir = repo
            .workdir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| repo.path().display().to_string());
        debug!(path = %workdir, "opened repository");

        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Returns the working directory path of the repository.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Looks up the commit named by `commit_id` and returns its tree id.
    pub fn commit_tree_id(&self, commit_id: &str) -> Result<Oid> {
        let oid = Oid::from_str(commit_id).map_err(|source| TreesqlError::Lookup {
            id: commit_id.to_string(),
            source,
        })?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|source| TreesqlError::Lookup {
                id: commit_id.to_string(),
                source,
            })?;
        Ok(commit.tree_id())
    }

    /// Reads the full content of the blob `blob_id`.
    pub fn blob_content(&self, blob_id: Oid) -> Result<Vec<u8>> {
        let blob = self
            .repo
            .find_blob(blob_id)
            .map_err(|source| TreesqlError::Lookup {
                id: blob_id.to_string(),
                source,
            })?;
        Ok(blob.content().to_vec())
    }

    /// Returns true when `HEAD` names a branch that has no commits yet.
    pub fn is_empty(&self) -> Result<bool> {
        match self.repo.head() {
            Ok(_) => Ok(false),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(true)
            }
            Err(e) => Err(TreesqlError::Walker(e)),
        }
    }

    /// Starts a new walk over every file of every commit reachable from `HEAD`.
    pub fn walk_files(&self) -> Result<HistoryWalker<'_>> {
        if self.is_empty()? {
            return Ok(HistoryWalker::empty(&self.repo));
        }

        let mut revwalk = self.repo.revwalk().map_err(TreesqlError::Walker)?;
        revwalk.push_head().map_err(TreesqlError::Walker)?;
        revwalk
            .set_sorting(git2::Sort::TIME | git2::Sort::TOPOLOGICAL)
            .map_err(TreesqlError::Walker)?;

        Ok(HistoryWalker::new(&self.repo, revwalk))
    }
}
