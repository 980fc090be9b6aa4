//! End-to-end tests of the extraction engine on sample exports

use chrono::{Datelike, Local, NaiveDate};

use filtrapx::files::{Document, InputSpec};
use filtrapx::normalize::FrequencySpeller;
use filtrapx::{Engine, Format, FilterCriteria, Gender, NameMode};

use crate::helpers::{fixtures_dir, load_fixture};

fn fixed_engine() -> Engine {
    Engine::default()
        .with_speller(Box::new(FrequencySpeller::builtin()))
        .with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn fixture_document(name: &str) -> Document {
    Document::new(name, load_fixture(name))
}

#[test]
fn fixtures_are_detected_as_expected() {
    let marker = filtrapx::extract::DEFAULT_SIGNATURE_MARKER;
    assert_eq!(Format::detect(&load_fixture("generic.txt"), marker), Format::Generic);
    assert_eq!(Format::detect(&load_fixture("delimited.txt"), marker), Format::Delimited);
    assert_eq!(Format::detect(&load_fixture("signature.txt"), marker), Format::Signature);
}

#[test]
fn generic_sample_yields_the_canonical_record() {
    let records = Engine::default().extract(&Document::new(
        "sample",
        "👤 Nome: João Souza\nCPF: 12345678901\nNascimento: 01/01/1990\nSexo: M",
    ));

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name.as_deref(), Some("JOÃO SOUZA"));
    assert_eq!(record.tax_id.as_deref(), Some("12345678901"));
    assert_eq!(record.birth_date_raw.as_deref(), Some("01/01/1990"));
    assert_eq!(record.gender, Some(Gender::M));
    assert_eq!(record.age, Some((Local::now().date_naive().year() - 1990) as u32));
}

#[test]
fn signature_sample_drops_noise_and_fixes_labels() {
    let records = fixed_engine().extract(&fixture_document("signature.txt"));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("MARIA SILVA"));
    assert_eq!(records[0].gender, Some(Gender::F));
    assert_eq!(records[0].age, Some(44));
    assert_eq!(records[1].name.as_deref(), Some("JOSE SANTOS"));
    assert_eq!(records[1].tax_id, None);
    assert_eq!(records[1].birth_date_raw.as_deref(), Some("1975-11-02"));
    assert_eq!(records[1].age, Some(48));
}

#[test]
fn two_block_document_with_narrowed_range_keeps_dated_block() {
    let text = "Nome: Ana\nNascimento: 10/10/1994\n\nNome: Bia\nSexo: F";
    let criteria = FilterCriteria::new("", NameMode::Exact, None, 20, 40).unwrap();

    let outcome = fixed_engine().process_batch(&[Document::new("two", text)], &criteria);

    assert_eq!(outcome.extracted, 2);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name.as_deref(), Some("ANA"));
    assert_eq!(outcome.records[0].age, Some(29));
}

#[test]
fn batch_concatenates_fixtures_in_order() {
    let documents = [
        fixture_document("delimited.txt"),
        fixture_document("generic.txt"),
        fixture_document("signature.txt"),
    ];

    let outcome = fixed_engine().process_batch(&documents, &FilterCriteria::default());

    let names: Vec<_> = outcome
        .records
        .iter()
        .map(|r| r.name.as_deref().unwrap_or("-"))
        .collect();
    assert_eq!(
        names,
        vec![
            "ANA LIMA",
            "CARLOS PEREIRA",
            "JOÃO SOUZA",
            "MARIA OLIVEIRA",
            "ANA COSTA",
            "MARIA SILVA",
            "JOSE SANTOS",
        ]
    );
}

#[test]
fn directory_spec_loads_fixtures_sorted() {
    let spec = InputSpec::Path {
        path: fixtures_dir(),
        extension: "txt".to_string(),
    };

    let documents: Vec<Document> = spec.load().unwrap().into_iter().map(Result::unwrap).collect();

    let ids: Vec<_> = documents
        .iter()
        .map(|d| d.id.rsplit('/').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["delimited.txt", "generic.txt", "signature.txt"]);
}
