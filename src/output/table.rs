use colored::*;
use prettytable::{Cell, Row, Table};
use serde_json::Value;

use super::{CommandOutput, cell_text};

/// Render a command result as bordered tables and status lines
pub fn render(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Table { columns, rows } => list_table(columns, rows).to_string(),
        CommandOutput::Record { fields } => record_table(fields).to_string(),
        CommandOutput::Created { resource, fields } if fields.is_empty() => {
            format!("{} {}", "Created a new".green(), resource)
        }
        CommandOutput::Created { resource, fields } => format!(
            "{} {}:\n{}",
            "Created a new".green(),
            resource,
            record_table(fields)
        ),
        CommandOutput::Deleted { resource, id } => format!("{} {}: {}", "Deleted".green(), resource, id),
    }
}

fn list_table(columns: &[String], rows: &[Vec<Value>]) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(columns.iter().map(|column| Cell::new(column)).collect()));

    for row in rows {
        table.add_row(Row::new(row.iter().map(|value| Cell::new(&cell_text(value))).collect()));
    }

    table
}

fn record_table(fields: &[(String, Value)]) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![Cell::new("Field"), Cell::new("Value")]));

    for (field, value) in fields {
        table.add_row(Row::new(vec![Cell::new(field), Cell::new(&cell_text(value))]));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_table_shows_titles_in_order() {
        let output = CommandOutput::Table {
            columns: vec!["id".into(), "cidr".into()],
            rows: vec![vec![json!("m1"), json!("AA:BB:CC:00:00:00/24")]],
        };

        let rendered = render(&output);
        let header = rendered.lines().nth(1).unwrap();
        assert!(header.find("id").unwrap() < header.find("cidr").unwrap());
        assert!(rendered.contains("AA:BB:CC:00:00:00/24"));
    }

    #[test]
    fn empty_cells_render_without_failing() {
        let output = CommandOutput::Table {
            columns: vec!["id".into(), "gateway".into()],
            rows: vec![vec![json!("r1"), Value::Null]],
        };
        assert!(render(&output).contains("r1"));
    }

    #[test]
    fn created_without_fields_is_a_status_line() {
        let output = CommandOutput::Created {
            resource: "route".into(),
            fields: Vec::new(),
        };

        let rendered = render(&output);
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.ends_with("route"));
    }

    #[test]
    fn record_table_lists_fields() {
        let output = CommandOutput::Record {
            fields: vec![("id".into(), json!("p1")), ("name".into(), json!("web"))],
        };

        let rendered = render(&output);
        assert!(rendered.contains("Field"));
        assert!(rendered.contains("web"));
    }
}
