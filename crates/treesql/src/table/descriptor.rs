//! Table lifecycle: declaration, repository handle, teardown.

use crate::error::{Result, TreesqlError};
use crate::git::GitRepo;
use crate::table::column::Column;
use crate::table::config::TableConfig;
use tracing::debug;

/// Builds the `CREATE TABLE` statement handed to the host.
pub fn schema_sql(table_name: &str) -> String {
    let columns: Vec<String> = Column::ALL
        .iter()
        .map(|c| format!("{} TEXT", c.name()))
        .collect();
    format!(
        "CREATE TABLE \"{}\"({})",
        table_name.replace('"', "\"\""),
        columns.join(", ")
    )
}

/// Per-table state of a `git_files` table.
///
/// The repository handle is opened by the first cursor and kept until the
/// table is disconnected. Cursors borrow it.
pub struct GitFilesTable {
    config: TableConfig,
    repo: Option<GitRepo>,
}

impl GitFilesTable {
    /// Parses the constructor arguments and returns the schema to declare
    /// together with the table. Nothing on disk is opened here.
    pub fn declare(args: &[&str]) -> Result<(String, Self)> {
        let config = TableConfig::from_args(args)?;
        debug!(
            table = %config.table_name,
            repo = %config.repo_path.display(),
            "declared git_files table"
        );

        let schema = schema_sql(&config.table_name);
        Ok((schema, Self { config, repo: None }))
    }

    /// Reconnecting is indistinguishable from creating: there is no state to
    /// restore.
    pub fn connect(args: &[&str]) -> Result<(String, Self)> {
        Self::declare(args)
    }

    pub fn is_open(&self) -> bool {
        self.repo.is_some()
    }

    /// Returns the repository handle, opening it on first use.
    pub fn open(&mut self) -> Result<&GitRepo> {
        if self.repo.is_none() {
            self.repo = Some(GitRepo::open(&self.config.repo_path)?);
        }
        self.repo
            .as_ref()
            .ok_or_else(|| TreesqlError::Cursor("repository handle unavailable".to_string()))
    }

    /// Drops the repository handle held by the table.
    pub fn disconnect(&mut self) {
        if self.repo.take().is_some() {
            debug!(table = %self.config.table_name, "released repository handle");
        }
    }

    pub fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_sql() {
        assert_eq!(
            schema_sql("files"),
            "CREATE TABLE \"files\"(commit_id TEXT, tree_id TEXT, file_id TEXT, name TEXT, contents TEXT)"
        );
    }

    #[test]
    fn test_declare_does_not_open() {
        let (schema, table) =
            GitFilesTable::declare(&["git_files", "main", "files", "'/nonexistent/repo'"])
                .unwrap();
        assert!(schema.contains("contents TEXT"));
        assert!(!table.is_open());
    }

    #[test]
    fn test_malformed_argument_never_opens() {
        let result = GitFilesTable::connect(&["git_files", "main", "files", "/nonexistent/repo"]);
        assert!(matches!(result, Err(TreesqlError::Config(_))));
    }

    #[test]
    fn test_open_missing_repository() {
        let (_, mut table) =
            GitFilesTable::declare(&["git_files", "main", "files", "'/nonexistent/repo'"])
                .unwrap();
        assert!(matches!(
            table.open(),
            Err(TreesqlError::RepositoryOpen { .. })
        ));
        assert!(!table.is_open());
        assert!(table.destroy().is_ok());
    }
}
