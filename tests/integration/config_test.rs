//! Integration tests for the config subcommands

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use filtrapx::{Config, OutputFormat};

use crate::helpers::{filtrapx, fixtures_dir};

#[test]
fn config_path_honours_environment_override() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join("config.toml");

    filtrapx(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn config_show_prints_defaults_without_file() {
    let home = TempDir::new().unwrap();

    filtrapx(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[output]"))
        .stdout(predicate::str::contains("sql_table = \"pessoas\""))
        .stdout(predicate::str::contains("signature_marker = \"BY: @AnoninoBuscasOfcBot\""));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");

    filtrapx(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
    filtrapx(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(Config::load_from(&path).unwrap().output.format, OutputFormat::Json);
}

#[test]
fn config_file_sets_report_defaults() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[output]\nformat = \"sql\"\nfile_name = \"export\"\nsql_table = \"contatos\"\n",
    )
    .unwrap();

    filtrapx(home.path())
        .arg(fixtures_dir().join("delimited.txt"))
        .assert()
        .success();

    let sql = fs::read_to_string(home.path().join("out").join("export.sql")).unwrap();
    assert!(sql.starts_with("INSERT INTO contatos "));
}

#[test]
fn config_noise_phrases_apply_to_runs() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[normalize]\nnoise_phrases = [\"jose santos\"]\n",
    )
    .unwrap();

    filtrapx(home.path())
        .args(["-p", "-n", "jose santos"])
        .arg(fixtures_dir().join("signature.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 resultado(s) encontrados."));
}

#[test]
fn broken_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[output\n").unwrap();

    filtrapx(home.path())
        .arg(fixtures_dir().join("generic.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"));
}
