//! # treesql
//!
//! Query every file of every commit in a Git repository using SQL.
//!
//! treesql registers a read-only SQLite virtual table module, `git_files`.
//! A table created with it walks the repository's history while the query
//! runs and yields one row per file present in each commit's snapshot.
//!
//! ## Quick Start
//!
//! ```no_run
//! use treesql::{SqlEngine, Result};
//!
//! fn main() -> Result<()> {
//!     let mut engine = SqlEngine::new()?;
//!
//!     engine.attach("files", ".")?;
//!     let result = engine.execute("SELECT commit_id, name FROM files LIMIT 5")?;
//!
//!     println!("Found {} rows", result.row_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Schema
//!
//! | column | content |
//! |---|---|
//! | `commit_id` | commit SHA |
//! | `tree_id` | root tree SHA of that commit |
//! | `file_id` | blob SHA |
//! | `name` | path within the commit |
//! | `contents` | file content |
//!
//! Rows come newest commit first (topological, then time order from `HEAD`);
//! within a commit, files follow a pre-order walk of its tree.
//!
//! The table can also be driven without SQLite through [`table::Cursor`].

pub mod cli;
pub mod error;
pub mod git;
pub mod sql;
pub mod table;

pub use cli::{Args, Command, OutputFormat};
pub use error::{Result, TreesqlError};
pub use git::GitRepo;
pub use sql::{QueryResult, SqlEngine, TableInfo, TABLES};
pub use table::{Cursor, CursorState, FileRow, GitFilesTable};
