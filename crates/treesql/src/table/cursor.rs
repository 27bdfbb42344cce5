//! Pull-based scan over a `git_files` table.

use crate::error::{Result, TreesqlError};
use crate::git::{FileTuple, GitRepo, HistoryWalker};
use crate::table::column::{self, ColumnValue, FileRow};
use crate::table::descriptor::GitFilesTable;
use tracing::debug;

/// Row id reported for every row. Rows have no stable identity.
pub const CONSTANT_ROWID: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Opened, `filter` not called yet.
    Uninitialized,
    Streaming,
    Exhausted,
    Closed,
}

/// Per-scan state: a walker and the tuple it produced last.
///
/// `filter` starts (or restarts) a full scan; `next` advances; `eof` reports
/// exhaustion; `column` resolves a field of the current row.
pub struct Cursor<'repo> {
    repo: &'repo GitRepo,
    walker: Option<HistoryWalker<'repo>>,
    current: Option<FileTuple>,
    state: CursorState,
}

impl<'repo> Cursor<'repo> {
    /// Opens a cursor over `table`, opening its repository if needed.
    pub fn open(table: &'repo mut GitFilesTable) -> Result<Self> {
        let repo = table.open()?;
        Ok(Self::new(repo))
    }

    pub fn new(repo: &'repo GitRepo) -> Self {
        debug!(repo = %repo.path(), "opened cursor");
        Self {
            repo,
            walker: None,
            current: None,
            state: CursorState::Uninitialized,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Starts a fresh full scan. Any previous walker is discarded.
    ///
    /// Constraint values from the host are not consulted.
    pub fn filter(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.walker = None;
        self.current = None;
        self.state = CursorState::Exhausted;

        self.walker = Some(self.repo.walk_files()?);
        debug!(repo = %self.repo.path(), "started history scan");
        self.advance()
    }

    pub fn next(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.walker.is_none() {
            return Err(TreesqlError::Cursor("next called before filter".to_string()));
        }
        self.advance()
    }

    pub fn eof(&self) -> bool {
        self.current.is_none()
    }

    pub fn column(&self, index: i32) -> Result<ColumnValue> {
        column::resolve_index(self.repo, self.current_tuple()?, index)
    }

    /// Resolves every column of the current row.
    pub fn row(&self) -> Result<FileRow> {
        FileRow::resolve(self.repo, self.current_tuple()?)
    }

    pub fn rowid(&self) -> Result<i64> {
        Ok(CONSTANT_ROWID)
    }

    /// Releases the walker and the current tuple.
    pub fn close(&mut self) {
        if self.state != CursorState::Closed {
            debug!(repo = %self.repo.path(), "closed cursor");
        }
        self.walker = None;
        self.current = None;
        self.state = CursorState::Closed;
    }

    fn advance(&mut self) -> Result<()> {
        let next = match self.walker.as_mut() {
            Some(walker) => walker.next().transpose()?,
            None => None,
        };

        self.state = match next {
            Some(_) => CursorState::Streaming,
            None => {
                debug!(repo = %self.repo.path(), "history scan exhausted");
                CursorState::Exhausted
            }
        };
        self.current = next;
        Ok(())
    }

    fn current_tuple(&self) -> Result<&FileTuple> {
        self.ensure_open()?;
        self.current
            .as_ref()
            .ok_or_else(|| TreesqlError::Cursor("no current row".to_string()))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == CursorState::Closed {
            return Err(TreesqlError::Cursor("cursor is closed".to_string()));
        }
        Ok(())
    }
}
