//! SQL layer: SQLite binding, engine and table documentation.

pub mod engine;
pub mod schema;
pub mod vtab;

pub use engine::{QueryResult, SqlEngine};
pub use schema::{get_table_info, ColumnInfo, TableInfo, EXAMPLES, FILES_TABLE, TABLES};
pub use vtab::{register, MODULE_NAME};
