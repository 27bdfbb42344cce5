//! Table documentation shown by the CLI.

use crate::sql::vtab::MODULE_NAME;
use serde::Serialize;

/// Name the engine gives the repository's `git_files` table.
pub const FILES_TABLE: &str = "files";

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: &'static str,
    pub module: &'static str,
    pub description: &'static str,
    pub columns: &'static [ColumnInfo],
}

pub static TABLES: &[TableInfo] = &[TableInfo {
    name: FILES_TABLE,
    module: MODULE_NAME,
    description: "One row per file in every commit reachable from HEAD",
    columns: &[
        ColumnInfo {
            name: "commit_id",
            sql_type: "TEXT",
            description: "Commit SHA",
        },
        ColumnInfo {
            name: "tree_id",
            sql_type: "TEXT",
            description: "Root tree SHA of the commit",
        },
        ColumnInfo {
            name: "file_id",
            sql_type: "TEXT",
            description: "Blob SHA of the file",
        },
        ColumnInfo {
            name: "name",
            sql_type: "TEXT",
            description: "Path of the file within the commit",
        },
        ColumnInfo {
            name: "contents",
            sql_type: "TEXT",
            description: "File content (BLOB when not valid UTF-8)",
        },
    ],
}];

pub fn get_table_info(name: &str) -> Option<&'static TableInfo> {
    TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

pub const EXAMPLES: &[(&str, &str)] = &[
    (
        "Files in the latest commit",
        "SELECT name, file_id FROM files WHERE commit_id = (SELECT commit_id FROM files LIMIT 1)",
    ),
    (
        "How many files each commit holds",
        "SELECT commit_id, COUNT(*) AS files FROM files GROUP BY commit_id",
    ),
    (
        "Every version of a file",
        "SELECT DISTINCT file_id FROM files WHERE name = 'README.md'",
    ),
    (
        "Commits where a TODO appears",
        "SELECT DISTINCT commit_id, name FROM files WHERE contents LIKE '%TODO%'",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_columns_match_declared_schema() {
        let info = get_table_info(FILES_TABLE).unwrap();
        let documented: Vec<&str> = info.columns.iter().map(|c| c.name).collect();
        let declared: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(documented, declared);
    }

    #[test]
    fn test_unknown_table() {
        assert!(get_table_info("commits").is_none());
        assert!(get_table_info("FILES").is_some());
    }
}
