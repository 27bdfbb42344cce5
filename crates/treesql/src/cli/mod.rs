//! Command-line interface definition.

pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use output::print_result;

const AFTER_HELP: &str = r#"TABLES:
  files    commit_id, tree_id, file_id, name, contents
           one row per file in every commit reachable from HEAD

EXAMPLES:
  treesql "SELECT name FROM files LIMIT 10"
  treesql -r ../other-repo "SELECT commit_id, COUNT(*) FROM files GROUP BY commit_id"
  treesql -f json "SELECT DISTINCT file_id FROM files WHERE name = 'README.md'"
  treesql tables"#;

#[derive(Parser, Debug)]
#[command(name = "treesql")]
#[command(about = "SQL query engine for Git file history")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// SQL query to execute
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Git repository path
    #[arg(short = 'r', long = "repo", env = "TREESQL_REPO", default_value = ".", global = true)]
    pub repo: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Omit header row
    #[arg(short = 'H', long = "no-header", global = true)]
    pub no_header: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available tables
    Tables,

    /// Show the columns of a table
    Schema {
        /// Table name
        table: String,
    },

    /// Show example queries
    Examples,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Jsonl,
    Csv,
}
