use serde_json::Value;
use tabled::builder::Builder;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => print_table(value),
    }
    Ok(())
}

/// Scalars go into one Field/Value table; arrays of records get their own.
fn print_table(value: &Value) {
    match value {
        Value::Object(_) => {
            let mut fields = Vec::new();
            let mut sections = Vec::new();
            flatten("", value, &mut fields, &mut sections);

            let mut builder = Builder::default();
            builder.push_record(["Field".to_string(), "Value".to_string()]);
            for (key, val) in fields {
                builder.push_record([key, val]);
            }
            println!("{}", builder.build());

            for (key, rows) in sections {
                println!("\n{key}:");
                print_array_table(rows);
            }
        }
        Value::Array(rows) => print_array_table(rows),
        other => println!("{}", format_value(other)),
    }
}

fn flatten<'a>(
    prefix: &str,
    value: &'a Value,
    fields: &mut Vec<(String, String)>,
    sections: &mut Vec<(String, &'a [Value])>,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, fields, sections);
            }
        }
        Value::Array(rows) => sections.push((prefix.to_string(), rows.as_slice())),
        other => fields.push((prefix.to_string(), format_value(other))),
    }
}

fn print_array_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", format_value(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }
    println!("{}", builder.build());
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_splits_scalars_and_tables() {
        let value = json!({
            "result": {"monthly_installment": "10258", "total_payable": "615480"},
            "product": "Home Loan",
            "schedule": [{"month": 1}, {"month": 2}],
        });
        let mut fields = Vec::new();
        let mut sections = Vec::new();
        flatten("", &value, &mut fields, &mut sections);

        assert!(fields.contains(&("product".to_string(), "Home Loan".to_string())));
        assert!(fields.contains(&("result.monthly_installment".to_string(), "10258".to_string())));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "schedule");
        assert_eq!(sections[0].1.len(), 2);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("8.5")), "8.5");
        assert_eq!(format_value(&json!(60)), "60");
        assert_eq!(format_value(&Value::Null), "-");
    }
}
