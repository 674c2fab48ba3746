use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Fields that hold the primary row list of a response, in lookup order.
const ROW_FIELDS: [&str; 3] = ["results", "items", "tables"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Responses wrapping a row list render as that list plus a footer of the
/// remaining scalar fields; anything else renders as key/value pairs.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items, None)),
        Value::Object(map) => Ok(render_object(map)),
        scalar => Ok(table::render(&["value"], &[vec![cell(&scalar)]], options())),
    }
}

fn render_object(map: Map<String, Value>) -> String {
    let Some((field, rows)) = ROW_FIELDS
        .iter()
        .find_map(|field| map.get(*field).and_then(Value::as_array).map(|rows| (*field, rows)))
    else {
        return key_value_table(&map);
    };

    let column_order = map.get("columns").and_then(Value::as_array).map(|columns| {
        columns
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect::<Vec<_>>()
    });

    let body = render_rows(rows, column_order);
    let footer = map
        .iter()
        .filter(|(key, _)| key.as_str() != field && key.as_str() != "columns")
        .filter(|(_, value)| !value.is_array() && !value.is_object())
        .map(|(key, value)| format!("{key}: {}", cell(value)))
        .collect::<Vec<_>>();
    if footer.is_empty() {
        body
    } else {
        format!("{body}\n\n{}", footer.join("  "))
    }
}

fn key_value_table(map: &Map<String, Value>) -> String {
    let rows = map
        .iter()
        .map(|(key, value)| vec![key.clone(), cell(value)])
        .collect::<Vec<_>>();
    table::render(&["key", "value"], &rows, options())
}

fn render_rows(items: &[Value], column_order: Option<Vec<String>>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, options());
    }

    let headers = column_order.unwrap_or_else(|| {
        let mut seen = Vec::<String>::new();
        for key in items.iter().filter_map(Value::as_object).flat_map(Map::keys) {
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
        seen
    });
    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render(&header_refs, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|item| !item.is_object()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Page {
        results: Vec<Row>,
        total: u64,
        columns: Vec<&'static str>,
    }

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        exact_mass: f64,
    }

    fn page() -> Page {
        Page {
            results: vec![Row {
                name: "glucose",
                exact_mass: 180.063,
            }],
            total: 1,
            columns: vec!["name", "exact_mass"],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&page(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["results"][0]["name"], "glucose");
        assert_eq!(parsed["total"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&page(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn table_render_uses_result_rows_and_column_order() {
        let out = render(&page(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let name_at = header.find("name").expect("name header");
        let mass_at = header.find("exact_mass").expect("mass header");
        assert!(name_at < mass_at);
        assert!(out.contains("glucose"));
        assert!(out.contains("total: 1"));
    }

    #[test]
    fn table_render_keeps_record_key_order_without_columns() {
        use mzdex_core::values::Record;

        #[derive(Serialize)]
        struct Report {
            items: Vec<Record>,
        }
        let report = Report {
            items: vec![
                Record::new()
                    .with("name", "glucose")
                    .with("exact_mass", 180.063)
                    .with("formula", "C6H12O6"),
            ],
        };
        let out = render(&report, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let name_at = header.find("name").expect("name header");
        let mass_at = header.find("exact_mass").expect("mass header");
        let formula_at = header.find("formula").expect("formula header");
        assert!(name_at < mass_at && mass_at < formula_at, "{header}");
    }

    #[test]
    fn footer_keeps_field_order() {
        #[derive(Serialize)]
        struct Counted {
            results: Vec<Row>,
            total: u64,
            page: u32,
        }
        let counted = Counted {
            results: page().results,
            total: 1,
            page: 1,
        };
        let out = render(&counted, OutputFormat::Table).expect("table render should work");
        assert!(out.ends_with("total: 1  page: 1"), "{out}");
    }

    #[test]
    fn table_render_without_rows_is_key_value() {
        #[derive(Serialize)]
        struct Status {
            status: &'static str,
        }
        let out = render(&Status { status: "healthy" }, OutputFormat::Table)
            .expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("healthy"));
    }

    #[test]
    fn empty_result_list_says_so() {
        let empty = Page {
            results: Vec::new(),
            total: 0,
            columns: vec!["name"],
        };
        let out = render(&empty, OutputFormat::Table).expect("table render should work");
        assert!(out.starts_with("(no rows)"));
    }
}
