//! Column resolution for the `git_files` table.

use crate::error::{Result, TreesqlError};
use crate::git::{FileTuple, GitRepo};
use serde::Serialize;

/// The five columns of the table, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CommitId,
    TreeId,
    FileId,
    Name,
    Contents,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::CommitId,
        Column::TreeId,
        Column::FileId,
        Column::Name,
        Column::Contents,
    ];

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::CommitId => "commit_id",
            Column::TreeId => "tree_id",
            Column::FileId => "file_id",
            Column::Name => "name",
            Column::Contents => "contents",
        }
    }
}

/// A resolved cell. File content that is not valid UTF-8 is kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl ColumnValue {
    fn from_content(content: Vec<u8>) -> Self {
        match String::from_utf8(content) {
            Ok(text) => ColumnValue::Text(text),
            Err(e) => ColumnValue::Bytes(e.into_bytes()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s),
            ColumnValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ColumnValue::Text(s) => s.as_bytes(),
            ColumnValue::Bytes(b) => b,
        }
    }
}

/// Resolves `column` for `file`.
///
/// `tree_id` is re-derived from the commit on every call and `contents` reads
/// the blob on every call; neither the commit nor the blob outlives this call.
pub fn resolve(repo: &GitRepo, file: &FileTuple, column: Column) -> Result<ColumnValue> {
    let value = match column {
        Column::CommitId => ColumnValue::Text(file.commit_id.clone()),
        Column::TreeId => ColumnValue::Text(repo.commit_tree_id(&file.commit_id)?.to_string()),
        Column::FileId => ColumnValue::Text(file.file_id.to_string()),
        Column::Name => ColumnValue::Text(file.path()),
        Column::Contents => ColumnValue::from_content(repo.blob_content(file.file_id)?),
    };
    Ok(value)
}

/// Resolves a column by its host-side index.
pub fn resolve_index(repo: &GitRepo, file: &FileTuple, index: i32) -> Result<ColumnValue> {
    let column = Column::from_index(index).ok_or(TreesqlError::InvalidColumn(index))?;
    resolve(repo, file, column)
}

/// One fully resolved row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub commit_id: String,
    pub tree_id: String,
    pub file_id: String,
    pub name: String,
    pub contents: ColumnValue,
}

impl FileRow {
    pub fn resolve(repo: &GitRepo, file: &FileTuple) -> Result<Self> {
        let text = |column| -> Result<String> {
            Ok(match resolve(repo, file, column)? {
                ColumnValue::Text(s) => s,
                ColumnValue::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
            })
        };

        Ok(Self {
            commit_id: text(Column::CommitId)?,
            tree_id: text(Column::TreeId)?,
            file_id: text(Column::FileId)?,
            name: text(Column::Name)?,
            contents: resolve(repo, file, Column::Contents)?,
        })
    }
}
