//! SQLite binding for the `git_files` table.
//!
//! ```sql
//! CREATE VIRTUAL TABLE files USING git_files('/path/to/repo');
//! SELECT name, file_id FROM files WHERE commit_id = '...';
//! ```
//!
//! The types here only convert between rusqlite and [`crate::table`].

use crate::error::{Result, TreesqlError};
use crate::table::{plan, ColumnValue, Cursor, GitFilesTable, OfferedConstraint};
use rusqlite::vtab::{
    read_only_module, sqlite3_vtab, sqlite3_vtab_cursor, Context, CreateVTab, IndexInfo, VTab,
    VTabConnection, VTabCursor, VTabKind, Values,
};
use rusqlite::Connection;
use std::os::raw::c_int;

/// Name the module is registered under.
pub const MODULE_NAME: &str = "git_files";

/// Registers the read-only `git_files` module on `conn`.
pub fn register(conn: &Connection) -> Result<()> {
    conn.create_module(MODULE_NAME, read_only_module::<GitFilesVTab>(), None)?;
    Ok(())
}

fn utf8_args<'a>(args: &[&'a [u8]]) -> Result<Vec<&'a str>> {
    args.iter()
        .map(|arg| {
            std::str::from_utf8(arg).map_err(|e| {
                TreesqlError::Config(format!("table argument is not valid UTF-8: {}", e))
            })
        })
        .collect()
}

#[repr(C)]
pub struct GitFilesVTab {
    /// Base class. Must be first.
    base: sqlite3_vtab,
    table: GitFilesTable,
}

impl GitFilesVTab {
    fn wrap((schema, table): (String, GitFilesTable)) -> (String, Self) {
        (
            schema,
            Self {
                base: sqlite3_vtab::default(),
                table,
            },
        )
    }
}

unsafe impl<'vtab> VTab<'vtab> for GitFilesVTab {
    type Aux = ();
    type Cursor = GitFilesVTabCursor<'vtab>;

    fn connect(
        _db: &mut VTabConnection,
        _aux: Option<&()>,
        args: &[&[u8]],
    ) -> rusqlite::Result<(String, Self)> {
        let args = utf8_args(args)?;
        Ok(Self::wrap(GitFilesTable::connect(&args)?))
    }

    fn best_index(&self, info: &mut IndexInfo) -> rusqlite::Result<()> {
        let offered: Vec<OfferedConstraint> = info
            .constraints()
            .map(|c| OfferedConstraint {
                column: c.column(),
                op: format!("{:?}", c.operator()),
                usable: c.is_usable(),
            })
            .collect();
        let choice = plan(&offered, info.order_bys().count());

        let mut argv_index = 0;
        for (i, used) in choice.used.iter().enumerate() {
            if *used {
                argv_index += 1;
                info.constraint_usage(i).set_argv_index(argv_index);
            }
        }
        info.set_idx_num(choice.idx_num);
        info.set_estimated_cost(choice.estimated_cost);
        info.set_order_by_consumed(choice.order_by_consumed);
        Ok(())
    }

    fn open(&'vtab mut self) -> rusqlite::Result<GitFilesVTabCursor<'vtab>> {
        let cursor = Cursor::open(&mut self.table)?;
        Ok(GitFilesVTabCursor {
            base: sqlite3_vtab_cursor::default(),
            cursor,
        })
    }
}

impl<'vtab> CreateVTab<'vtab> for GitFilesVTab {
    const KIND: VTabKind = VTabKind::Default;

    fn create(
        _db: &mut VTabConnection,
        _aux: Option<&()>,
        args: &[&[u8]],
    ) -> rusqlite::Result<(String, Self)> {
        let args = utf8_args(args)?;
        Ok(Self::wrap(GitFilesTable::declare(&args)?))
    }

    fn destroy(&self) -> rusqlite::Result<()> {
        Ok(self.table.destroy()?)
    }
}

impl Drop for GitFilesVTab {
    fn drop(&mut self) {
        self.table.disconnect();
    }
}

#[repr(C)]
pub struct GitFilesVTabCursor<'vtab> {
    /// Base class. Must be first.
    base: sqlite3_vtab_cursor,
    cursor: Cursor<'vtab>,
}

unsafe impl VTabCursor for GitFilesVTabCursor<'_> {
    fn filter(
        &mut self,
        _idx_num: c_int,
        _idx_str: Option<&str>,
        _args: &Values<'_>,
    ) -> rusqlite::Result<()> {
        Ok(self.cursor.filter()?)
    }

    fn next(&mut self) -> rusqlite::Result<()> {
        Ok(self.cursor.next()?)
    }

    fn eof(&self) -> bool {
        self.cursor.eof()
    }

    fn column(&self, ctx: &mut Context, i: c_int) -> rusqlite::Result<()> {
        match self.cursor.column(i)? {
            ColumnValue::Text(text) => ctx.set_result(&text),
            ColumnValue::Bytes(bytes) => ctx.set_result(&bytes),
        }
    }

    fn rowid(&self) -> rusqlite::Result<i64> {
        Ok(self.cursor.rowid()?)
    }
}

impl Drop for GitFilesVTabCursor<'_> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}
