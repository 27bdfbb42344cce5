use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sql::QueryResult;
use serde_json::Value;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Widest cell printed in table format before truncation.
const MAX_CELL_WIDTH: usize = 60;

pub fn print_result<W: Write>(
    writer: &mut W,
    result: &QueryResult,
    format: OutputFormat,
    show_header: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.to_json_array())?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Jsonl => {
            for row in result.to_json_array() {
                writeln!(writer, "{}", serde_json::to_string(&row)?)?;
            }
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            if show_header {
                csv.write_record(&result.columns)?;
            }
            for row in &result.rows {
                csv.write_record(row.iter().map(value_to_string))?;
            }
            csv.flush()?;
        }
        OutputFormat::Table => {
            if result.is_empty() {
                writeln!(writer, "No results")?;
                return Ok(());
            }

            let mut builder = Builder::default();
            if show_header {
                builder.push_record(result.columns.iter().cloned());
            }
            for row in &result.rows {
                builder.push_record(row.iter().map(|v| truncate(&value_to_string(v))));
            }

            let mut table = builder.build();
            table.with(Style::rounded());
            writeln!(writer, "{}", table)?;
            writeln!(writer, "{} row(s)", result.row_count())?;
        }
    }
    Ok(())
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn truncate(s: &str) -> String {
    let first_line = s.lines().next().unwrap_or("");
    let multiline = first_line.len() < s.len();
    if first_line.chars().count() > MAX_CELL_WIDTH {
        let head: String = first_line.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", head)
    } else if multiline {
        format!("{}...", first_line)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> QueryResult {
        QueryResult {
            columns: vec!["name".to_string(), "size".to_string()],
            rows: vec![vec![json!("a.txt"), json!(5)], vec![json!("b.txt"), Value::Null]],
        }
    }

    fn render(format: OutputFormat, show_header: bool) -> String {
        let mut out = Vec::new();
        print_result(&mut out, &sample(), format, show_header).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_output() {
        assert_eq!(render(OutputFormat::Csv, true), "name,size\na.txt,5\nb.txt,\n");
        assert_eq!(render(OutputFormat::Csv, false), "a.txt,5\nb.txt,\n");
    }

    #[test]
    fn test_jsonl_output() {
        let out = render(OutputFormat::Jsonl, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            json!({"name": "a.txt", "size": 5})
        );
    }

    #[test]
    fn test_table_output() {
        let out = render(OutputFormat::Table, true);
        assert!(out.contains("name"));
        assert!(out.contains("a.txt"));
        assert!(out.contains("2 row(s)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        assert_eq!(truncate("line one\nline two"), "line one...");
        let long = "x".repeat(100);
        assert_eq!(truncate(&long).chars().count(), MAX_CELL_WIDTH);
    }
}
