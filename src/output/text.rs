//! Plain-text report in the layout users of the original exports expect.

use crate::record::Record;

const SEPARATOR_WIDTH: usize = 24;

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

fn render_one(record: &Record) -> String {
    let age = record
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Indefinida".to_string());

    format!(
        "Nome: {}\nCPF/CNPJ: {}\nNascimento: {}\nSexo: {}\nIdade: {}\n{}\n",
        or_placeholder(record.name.as_deref(), "Não informado"),
        or_placeholder(record.tax_id.as_deref(), "Nenhum"),
        or_placeholder(record.birth_date_raw.as_deref(), "Não informado"),
        or_placeholder(record.gender.map(|g| g.as_str()), "Não informado"),
        age,
        "-".repeat(SEPARATOR_WIDTH),
    )
}

/// One block per record, separated by blank lines.
pub fn render_text(records: &[Record]) -> String {
    records.iter().map(render_one).collect::<Vec<_>>().join("\n")
}

/// Closing line printed after the report.
pub fn summary_line(count: usize) -> String {
    format!("{} resultado(s) encontrados.", count)
}
