//! SQL query engine over `git_files` virtual tables.

use crate::error::{Result, TreesqlError};
use crate::sql::schema::TABLES;
use crate::sql::vtab::{self, MODULE_NAME};
use crate::table::TableConfig;
use regex::Regex;
use rusqlite::{Connection, Row};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// The SQL query engine that executes queries against Git file history.
///
/// `SqlEngine` keeps an in-memory SQLite database with the `git_files` module
/// registered. Repositories are attached as virtual tables; rows are produced
/// by walking history while the query runs, nothing is copied up front.
///
/// # Example
///
/// ```no_run
/// use treesql::SqlEngine;
///
/// let mut engine = SqlEngine::new()?;
///
/// // Attach only tables referenced in the query
/// engine.load_tables_for_query("SELECT name FROM files LIMIT 10", ".")?;
///
/// let result = engine.execute("SELECT name FROM files LIMIT 10")?;
/// println!("Columns: {:?}", result.columns);
/// # Ok::<(), treesql::TreesqlError>(())
/// ```
pub struct SqlEngine {
    conn: Connection,
    attached: HashSet<String>,
}

impl SqlEngine {
    /// Creates a new SQL engine with an empty in-memory database.
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        vtab::register(&conn)?;
        Ok(Self {
            conn,
            attached: HashSet::new(),
        })
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Extracts known table names referenced in a SQL query.
    pub fn extract_table_names(query: &str) -> HashSet<String> {
        let mut tables = HashSet::new();

        for table in TABLES.iter().map(|t| t.name) {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(table));
            if let Ok(re) = Regex::new(&pattern) {
                if re.is_match(query) {
                    tables.insert(table.to_string());
                }
            }
        }

        tables
    }

    /// Attaches the repository at `repo_path` as the virtual table `table_name`.
    ///
    /// Attaching only declares the table; the repository is opened by the
    /// first scan. The constructor argument is checked before SQLite sees it,
    /// so a bad path fails with `Config`. Subsequent calls for the same table
    /// are no-ops.
    pub fn attach<P: AsRef<Path>>(&mut self, table_name: &str, repo_path: P) -> Result<()> {
        if self.attached.contains(table_name) {
            return Ok(());
        }

        let path = repo_path.as_ref().display().to_string();
        if path.contains('\'') {
            return Err(TreesqlError::Config(format!(
                "repository path cannot contain a single quote: {}",
                path
            )));
        }
        let argument = format!("'{}'", path);
        TableConfig::from_args(&[MODULE_NAME, "main", table_name, &argument])?;

        let sql = format!(
            "CREATE VIRTUAL TABLE \"{}\" USING {}({})",
            table_name.replace('"', "\"\""),
            MODULE_NAME,
            argument
        );
        debug!(%sql, "attaching repository");
        self.conn.execute(&sql, [])?;

        self.attached.insert(table_name.to_string());
        Ok(())
    }

    /// Attaches every known table referenced in `query` to `repo_path`.
    pub fn load_tables_for_query<P: AsRef<Path>>(&mut self, query: &str, repo_path: P) -> Result<()> {
        for table in Self::extract_table_names(query) {
            self.attach(&table, repo_path.as_ref())?;
        }
        Ok(())
    }

    /// Executes a SQL query and returns the results.
    ///
    /// A failure while producing any row fails the whole query.
    pub fn execute(&self, query: &str) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(query)?;

        let column_names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let rows = stmt
            .query_map([], |row| Ok(row_to_values(row, column_names.len())))?
            .collect::<rusqlite::Result<Vec<Vec<Value>>>>()?;

        Ok(QueryResult {
            columns: column_names,
            rows,
        })
    }
}

fn row_to_values(row: &Row, col_count: usize) -> Vec<Value> {
    (0..col_count)
        .map(|i| {
            if let Ok(v) = row.get::<_, Option<i64>>(i) {
                match v {
                    Some(n) => Value::Number(n.into()),
                    None => Value::Null,
                }
            } else if let Ok(v) = row.get::<_, Option<f64>>(i) {
                match v {
                    Some(n) => {
                        if let Some(num) = serde_json::Number::from_f64(n) {
                            Value::Number(num)
                        } else {
                            Value::String(n.to_string())
                        }
                    }
                    None => Value::Null,
                }
            } else if let Ok(v) = row.get::<_, Option<String>>(i) {
                match v {
                    Some(s) => Value::String(s),
                    None => Value::Null,
                }
            } else if let Ok(Some(b)) = row.get::<_, Option<Vec<u8>>>(i) {
                Value::String(String::from_utf8_lossy(&b).into_owned())
            } else {
                Value::Null
            }
        })
        .collect()
}

/// The result of a SQL query execution.
#[derive(Debug)]
pub struct QueryResult {
    /// Column names from the query.
    pub columns: Vec<String>,
    /// Row data as JSON values.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Returns true if the result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Converts the result to a JSON array of objects.
    ///
    /// Each row becomes a JSON object with column names as keys.
    pub fn to_json_array(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, col) in self.columns.iter().enumerate() {
                    obj.insert(col.clone(), row.get(i).cloned().unwrap_or(Value::Null));
                }
                Value::Object(obj)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_table_names() {
        let tables = SqlEngine::extract_table_names("SELECT * FROM files f WHERE f.name = 'x'");
        assert!(tables.contains("files"));

        let tables = SqlEngine::extract_table_names("SELECT 1 FROM filesystem");
        assert!(tables.is_empty());
    }

    #[test]
    fn test_attach_rejects_quote_in_path() {
        let mut engine = SqlEngine::new().unwrap();
        let result = engine.attach("files", "/tmp/it's");
        assert!(matches!(result, Err(TreesqlError::Config(_))));
    }

    #[test]
    fn test_attach_rejects_empty_path() {
        let mut engine = SqlEngine::new().unwrap();
        let result = engine.attach("files", "");
        assert!(matches!(result, Err(TreesqlError::Config(_))));
    }

    #[test]
    fn test_attach_over_existing_table_is_sql_error() {
        let mut engine = SqlEngine::new().unwrap();
        engine
            .connection()
            .execute("CREATE TABLE files (x INTEGER)", [])
            .unwrap();
        let result = engine.attach("files", "/nonexistent/repo");
        assert!(matches!(result, Err(TreesqlError::Sql(_))), "{:?}", result);
    }

    #[test]
    fn test_attach_is_lazy() {
        let mut engine = SqlEngine::new().unwrap();
        engine.attach("files", "/nonexistent/repo").unwrap();
        engine.attach("files", "/nonexistent/repo").unwrap();

        let err = engine.execute("SELECT * FROM files").unwrap_err();
        assert!(err.to_string().contains("Repository not found"));
    }

    #[test]
    fn test_query_result_json() {
        let engine = SqlEngine::new().unwrap();
        let result = engine.execute("SELECT 1 AS one, 'a' AS letter").unwrap();
        assert_eq!(result.row_count(), 1);
        let json = result.to_json_array();
        assert_eq!(json[0]["one"], 1);
        assert_eq!(json[0]["letter"], "a");
    }
}
