//! The `git_files` table, independent of any SQL host.
//!
//! [`GitFilesTable`] holds the configuration and repository handle,
//! [`Cursor`] drives one scan, [`column`] turns the current tuple into values
//! and [`plan`] answers index negotiation. The SQLite binding in
//! [`crate::sql::vtab`] only forwards to these.

pub mod column;
pub mod config;
pub mod cursor;
pub mod descriptor;
pub mod plan;

pub use column::{Column, ColumnValue, FileRow};
pub use config::TableConfig;
pub use cursor::{Cursor, CursorState, CONSTANT_ROWID};
pub use descriptor::{schema_sql, GitFilesTable};
pub use plan::{plan, IndexChoice, OfferedConstraint};
