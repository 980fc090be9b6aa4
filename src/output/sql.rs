//! SQL `INSERT` statements for loading results into a database.

use crate::record::Record;

/// Quote a string literal, or `NULL` when absent.
fn literal(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("'{}'", v.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

/// Keep identifier characters only, so a configured table name cannot
/// inject SQL.
fn identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        "pessoas".to_string()
    } else {
        cleaned
    }
}

/// One `INSERT` per record.
pub fn render_sql(records: &[Record], table: &str) -> String {
    let table = identifier(table);
    records
        .iter()
        .map(|record| {
            let age = record
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "NULL".to_string());
            format!(
                "INSERT INTO {} (nome, documento, nascimento, sexo, idade) VALUES ({}, {}, {}, {}, {});\n",
                table,
                literal(record.name.as_deref()),
                literal(record.tax_id.as_deref()),
                literal(record.birth_date_raw.as_deref()),
                literal(record.gender.map(|g| g.as_str())),
                age,
            )
        })
        .collect()
}
