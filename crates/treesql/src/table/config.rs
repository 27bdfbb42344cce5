//! Parsing of the virtual table constructor arguments.

use crate::error::{Result, TreesqlError};
use std::path::PathBuf;

/// Index of the repository path among the host's constructor arguments:
/// module name, database name, table name, then the user arguments.
pub const PATH_ARG: usize = 3;

/// Configuration carried by a `git_files` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub repo_path: PathBuf,
}

impl TableConfig {
    /// Builds the configuration from the host's constructor arguments.
    ///
    /// Only inspects strings; the repository is not touched.
    pub fn from_args(args: &[&str]) -> Result<Self> {
        let table_name = args
            .get(PATH_ARG - 1)
            .ok_or_else(|| TreesqlError::Schema("host supplied no table name".to_string()))?;

        let user_args = &args[PATH_ARG.min(args.len())..];
        let raw = match user_args {
            [path] => *path,
            [] => {
                return Err(TreesqlError::Config(
                    "expected a quoted repository path".to_string(),
                ))
            }
            _ => {
                return Err(TreesqlError::Config(format!(
                    "expected a single repository path, got {} arguments",
                    user_args.len()
                )))
            }
        };

        Ok(Self {
            table_name: table_name.to_string(),
            repo_path: PathBuf::from(unquote(raw)?),
        })
    }
}

/// Strips exactly one leading and one trailing quote character.
///
/// The quotes must be a matching pair of `'` or `"`.
pub fn unquote(raw: &str) -> Result<&str> {
    let bytes = raw.as_bytes();
    let quoted = bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"')
        && bytes[bytes.len() - 1] == bytes[0];
    if !quoted {
        return Err(TreesqlError::Config(format!(
            "repository path must be quoted: {}",
            raw
        )));
    }

    let inner = &raw[1..raw.len() - 1];
    if inner.is_empty() {
        return Err(TreesqlError::Config("repository path is empty".to_string()));
    }
    Ok(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let config =
            TableConfig::from_args(&["git_files", "main", "files", "'/tmp/repo'"]).unwrap();
        assert_eq!(config.table_name, "files");
        assert_eq!(config.repo_path, PathBuf::from("/tmp/repo"));
    }

    #[test]
    fn test_unquote_trims_one_character() {
        assert_eq!(unquote("'repo'").unwrap(), "repo");
        assert_eq!(unquote("\"repo\"").unwrap(), "repo");
        assert_eq!(unquote("''a b''").unwrap(), "'a b'");
    }

    #[test]
    fn test_unquoted_path_rejected() {
        let result = TableConfig::from_args(&["git_files", "main", "files", "/tmp/repo"]);
        assert!(matches!(result, Err(TreesqlError::Config(_))));
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        for raw in ["'/tmp/repo", "/tmp/repo'", "'/tmp/repo\"", "'", "''"] {
            assert!(
                matches!(unquote(raw), Err(TreesqlError::Config(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_and_extra_arguments() {
        let missing = TableConfig::from_args(&["git_files", "main", "files"]);
        assert!(matches!(missing, Err(TreesqlError::Config(_))));

        let extra = TableConfig::from_args(&["git_files", "main", "files", "'a'", "'b'"]);
        assert!(matches!(extra, Err(TreesqlError::Config(_))));
    }

    #[test]
    fn test_missing_table_name() {
        let result = TableConfig::from_args(&["git_files", "main"]);
        assert!(matches!(result, Err(TreesqlError::Schema(_))));
    }
}
