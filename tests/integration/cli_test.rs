//! Integration tests for the filtrapx command line

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{filtrapx, fixtures_dir, load_fixture};

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn generic_export_prints_and_writes_report() {
    let home = TempDir::new().unwrap();
    let fixture = fixtures_dir().join("generic.txt");

    filtrapx(home.path())
        .args(["-p", "-n", "joão souza"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: JOÃO SOUZA"))
        .stdout(predicate::str::contains("CPF/CNPJ: 12345678901"))
        .stdout(predicate::str::contains("Nascimento: 01/01/1990"))
        .stdout(predicate::str::contains("Sexo: M"))
        .stdout(predicate::str::contains("1 resultado(s) encontrados."))
        .stdout(predicate::str::contains("MARIA").not());

    let report = fs::read_to_string(home.path().join("out").join("resultados.txt")).unwrap();
    assert!(report.starts_with("Nome: JOÃO SOUZA\n"));
    assert!(report.contains("------------------------"));
}

#[test]
fn without_print_stdout_stays_empty() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("resultados.txt"));

    let report = fs::read_to_string(home.path().join("out").join("resultados.txt")).unwrap();
    assert_eq!(report.matches("Nome: ").count(), 3);
}

#[test]
fn output_dir_flag_overrides_default() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("reports");

    filtrapx(home.path())
        .arg("-o")
        .arg(&out)
        .arg(fixtures_dir().join("delimited.txt"))
        .assert()
        .success();

    assert!(out.join("resultados.txt").exists());
    assert!(!home.path().join("out").exists());
}

#[test]
fn json_format_writes_structured_records() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-f", "json"])
        .arg(fixtures_dir().join("delimited.txt"))
        .assert()
        .success()
        .stdout("");

    let json = fs::read_to_string(home.path().join("out").join("resultados.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[0]["name"], "ANA LIMA");
    assert_eq!(records[0]["tax_id"], "11122233344");
    assert_eq!(records[0]["gender"], "F");
    assert_eq!(records[1]["name"], "CARLOS PEREIRA");
    assert_eq!(records[1]["tax_id"], "12345678000190");
    assert!(records[1]["birth_date_raw"].is_null());
    assert!(records[1]["age"].is_null());
}

#[test]
fn sql_format_writes_inserts() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-f", "sql", "-p"])
        .arg(fixtures_dir().join("delimited.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("INSERT INTO pessoas"))
        .stdout(predicate::str::contains("'CARLOS PEREIRA', '12345678000190', NULL, 'M', NULL"));

    assert!(home.path().join("out").join("resultados.sql").exists());
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn narrowed_age_range_drops_records_without_birth_date() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "--imn", "0", "--imx", "150", "-s", "F"])
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ANA COSTA"))
        .stdout(predicate::str::contains("2 resultado(s) encontrados."));

    filtrapx(home.path())
        .args(["-p", "--min-age", "1", "-s", "F"])
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ANA COSTA").not())
        .stdout(predicate::str::contains("1 resultado(s) encontrados."));
}

#[test]
fn name_modes_use_legacy_aliases() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "-n", "ana", "-m", "comeca"])
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ANA COSTA"))
        .stdout(predicate::str::contains("1 resultado(s) encontrados."));
}

#[test]
fn corrupt_birth_dates_are_excluded_by_default() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "-"])
        .write_stdin("Nome: Velho\nNascimento: 01/01/1500\n\nNome: Curto\nNascimento: 01/01/90\n")
        .assert()
        .success()
        .stdout("0 resultado(s) encontrados.\n");

    filtrapx(home.path())
        .args(["-p", "--max-age", "5000", "-"])
        .write_stdin("Nome: Velho\nNascimento: 01/01/1500\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: VELHO"))
        .stdout(predicate::str::contains("1 resultado(s) encontrados."));
}

#[test]
fn inverted_age_range_is_rejected() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["--min-age", "50", "--max-age", "20"])
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("greater than maximum age"));

    assert!(!home.path().join("out").exists());
}

#[test]
fn extra_noise_phrase_drops_matching_lines() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "--noise", "maria silva"])
        .arg(fixtures_dir().join("signature.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: Não informado"))
        .stdout(predicate::str::contains("CPF/CNPJ: 12345678901"))
        .stdout(predicate::str::contains("2 resultado(s) encontrados."));
}

#[test]
fn noise_words_inside_generic_names_are_kept() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "-"])
        .write_stdin("Nome: Zeronildo Alves\nSexo: M\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: ZERONILDO ALVES"))
        .stdout(predicate::str::contains("1 resultado(s) encontrados."));
}

#[test]
fn spelling_pass_repairs_bot_labels() {
    let home = TempDir::new().unwrap();
    let fixture = fixtures_dir().join("signature.txt");

    filtrapx(home.path())
        .args(["-p", "-n", "maria silva"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sexo: F"))
        .stdout(predicate::str::contains("1 resultado(s) encontrados."));

    filtrapx(home.path())
        .args(["-p", "-n", "maria silva", "--no-spelling"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout("0 resultado(s) encontrados.\n");
}

// ============================================================================
// Input Tests
// ============================================================================

#[test]
fn stdin_is_read_with_dash() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["-p", "-"])
        .write_stdin(load_fixture("delimited.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: ANA LIMA"))
        .stdout(predicate::str::contains("2 resultado(s) encontrados."));
}

#[test]
fn directory_input_reads_every_export() {
    let home = TempDir::new().unwrap();
    let dumps = home.path().join("dumps");
    fs::create_dir(&dumps).unwrap();
    fs::write(dumps.join("a.txt"), load_fixture("delimited.txt")).unwrap();
    fs::write(dumps.join("b.txt"), load_fixture("generic.txt")).unwrap();
    fs::write(dumps.join("ignored.csv"), load_fixture("generic.txt")).unwrap();

    filtrapx(home.path())
        .arg("-p")
        .arg(&dumps)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 resultado(s) encontrados."));
}

#[test]
fn termux_mode_uses_newest_export() {
    let home = TempDir::new().unwrap();
    let downloads = home.path().join("downloads");
    fs::create_dir(&downloads).unwrap();
    fs::write(downloads.join("only.txt"), load_fixture("delimited.txt")).unwrap();
    fs::write(
        home.path().join("config.toml"),
        format!("[input]\nlatest_dir = {:?}\n", downloads.display().to_string()),
    )
    .unwrap();

    filtrapx(home.path())
        .args(["-t", "-p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome: ANA LIMA"))
        .stdout(predicate::str::contains("2 resultado(s) encontrados."));
}

#[test]
fn termux_mode_without_folder_fails() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[input]\nlatest_dir = \"/nonexistent/telegram\"\n",
    )
    .unwrap();

    filtrapx(home.path())
        .arg("--termux")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn missing_input_file_fails() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .arg("nope.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source unavailable"));
}

#[test]
fn no_input_is_an_error() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No input given"));
}

// ============================================================================
// Misc Commands
// ============================================================================

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filtrapx"));
}

#[test]
fn version_is_printed() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
