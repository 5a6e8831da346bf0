//! Rendering of command results as table, JSON or CSV

pub mod table;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered table (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// What a resource command produced, before rendering
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Records projected onto the declared columns; absent fields are `Null`
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// A single record, fields in server order
    Record { fields: Vec<(String, Value)> },
    /// A freshly created record
    Created {
        resource: String,
        fields: Vec<(String, Value)>,
    },
    Deleted { resource: String, id: String },
}

pub fn render(output: &CommandOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render(output)),
        OutputFormat::Json => serde_json::to_string_pretty(&to_json(output)).context("Failed to format JSON output"),
        OutputFormat::Csv => Ok(to_csv(output)),
    }
}

/// Text of one table or CSV cell.
///
/// Missing and `null` values are empty; list values are rendered one
/// element per line; nested objects stay compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join("\n"),
        Value::Object(_) => value.to_string(),
    }
}

fn fields_to_object(fields: &[(String, Value)]) -> Value {
    Value::Object(fields.iter().cloned().collect::<Map<String, Value>>())
}

fn to_json(output: &CommandOutput) -> Value {
    match output {
        CommandOutput::Table { columns, rows } => Value::Array(
            rows.iter()
                .map(|row| {
                    Value::Object(
                        columns
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned())
                            .collect::<Map<String, Value>>(),
                    )
                })
                .collect(),
        ),
        CommandOutput::Record { fields } | CommandOutput::Created { fields, .. } => fields_to_object(fields),
        CommandOutput::Deleted { resource, id } => serde_json::json!({
            "resource": resource,
            "id": id,
            "deleted": true,
        }),
    }
}

fn to_csv(output: &CommandOutput) -> String {
    let mut csv = String::new();
    match output {
        CommandOutput::Table { columns, rows } => {
            push_csv_line(&mut csv, columns.iter().map(String::as_str));
            for row in rows {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                push_csv_line(&mut csv, cells.iter().map(String::as_str));
            }
        }
        CommandOutput::Record { fields } | CommandOutput::Created { fields, .. } => {
            push_csv_line(&mut csv, ["field", "value"]);
            for (field, value) in fields {
                push_csv_line(&mut csv, [field.as_str(), cell_text(value).as_str()]);
            }
        }
        CommandOutput::Deleted { resource, id } => {
            push_csv_line(&mut csv, ["resource", "id"]);
            push_csv_line(&mut csv, [resource.as_str(), id.as_str()]);
        }
    }
    csv
}

fn push_csv_line<'a>(csv: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let line: Vec<String> = cells.into_iter().map(csv_escape).collect();
    csv.push_str(&line.join(","));
    csv.push('\n');
}

/// Quote a cell holding separators, quotes or line breaks (CRLF included)
fn csv_escape(cell: &str) -> String {
    let needs_quotes = cell.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r'));
    if !needs_quotes {
        return cell.to_string();
    }

    let mut quoted = String::with_capacity(cell.len() + 2);
    quoted.push('"');
    for c in cell.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
