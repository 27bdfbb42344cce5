//! treesql CLI - SQL queries over Git file history

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use treesql::cli::print_result;
use treesql::sql::{get_table_info, EXAMPLES};
use treesql::{Args, Command, OutputFormat, SqlEngine, TreesqlError, TABLES};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("treesql=debug")
            .with_writer(io::stderr)
            .init();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Some(Command::Tables) => {
            for table in TABLES {
                writeln!(out, "{:<10} {}", table.name, table.description)?;
            }
        }
        Some(Command::Schema { ref table }) => {
            let info =
                get_table_info(table).ok_or_else(|| TreesqlError::TableNotFound(table.clone()))?;
            if args.format == OutputFormat::Json {
                writeln!(out, "{}", serde_json::to_string_pretty(info)?)?;
            } else {
                writeln!(out, "{} (module {})", info.name, info.module)?;
                for column in info.columns {
                    writeln!(
                        out,
                        "  {:<10} {:<5} {}",
                        column.name, column.sql_type, column.description
                    )?;
                }
            }
        }
        Some(Command::Examples) => {
            for (title, query) in EXAMPLES {
                writeln!(out, "-- {}\n{};\n", title, query)?;
            }
        }
        None => {
            let Some(query) = args.query.as_deref() else {
                use clap::CommandFactory;
                Args::command().print_help()?;
                return Ok(());
            };

            let mut engine = SqlEngine::new()?;
            engine
                .load_tables_for_query(query, &args.repo)
                .with_context(|| format!("attaching {}", args.repo.display()))?;
            let result = engine.execute(query)?;
            print_result(&mut out, &result, args.format, !args.no_header)?;
        }
    }

    Ok(())
}
