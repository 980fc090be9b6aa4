//! Default command: extract, filter and write the report.

use anyhow::{bail, Context, Result};
use tracing::warn;

use filtrapx::cli::RunArgs;
use filtrapx::files::{Document, InputSpec};
use filtrapx::output::{self, summary_line};
use filtrapx::{Config, Engine, FilterCriteria};

/// Which input the arguments select.
fn input_spec(args: &RunArgs, config: &Config) -> Result<InputSpec> {
    if args.termux {
        return Ok(InputSpec::Latest {
            dir: config.input.latest_dir.clone(),
            extension: config.input.extension.clone(),
        });
    }
    match args.input.as_deref() {
        Some("-") => Ok(InputSpec::Stdin),
        Some(path) => Ok(InputSpec::Path {
            path: path.into(),
            extension: config.input.extension.clone(),
        }),
        None => bail!("No input given: pass a file, a directory, '-' or --termux"),
    }
}

/// Load every readable document. Unreadable inputs are skipped with a
/// warning unless nothing at all could be read.
fn load_documents(spec: &InputSpec) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    let mut first_error = None;

    for loaded in spec.load()? {
        match loaded {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!(error = %e, "skipping input");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if documents.is_empty() => Err(e.into()),
        _ => Ok(documents),
    }
}

fn build_engine(args: &RunArgs, config: &Config) -> Result<Engine> {
    let settings = &config.normalize;
    let mut engine = Engine::new(settings.normalizer(&args.noise))
        .with_signature_marker(settings.signature_marker.clone());

    if !args.no_spelling {
        if let Some(speller) = settings.speller().context("Failed to load spelling dictionary")? {
            engine = engine.with_speller(Box::new(speller));
        }
    }
    Ok(engine)
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &RunArgs) -> Result<()> {
    let criteria = FilterCriteria::new(
        args.name.clone().unwrap_or_default(),
        args.mode,
        args.gender,
        args.min_age,
        args.max_age,
    )?;
    let config = Config::load().context("Failed to load configuration")?;

    let documents = load_documents(&input_spec(args, &config)?)?;
    let engine = build_engine(args, &config)?;
    let outcome = engine.process_batch(&documents, &criteria);

    let format = args.format.unwrap_or(config.output.format);
    let report = output::render(&outcome.records, format, &config.output.sql_table)?;
    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let path = output::write_report(&dir, &config.output.file_name, format, &report)?;

    if args.print {
        print!("{}", report);
        if !report.is_empty() && !report.ends_with('\n') {
            println!();
        }
        println!("{}", summary_line(outcome.records.len()));
    }
    eprintln!("Resultados salvos em {}", path.display());
    Ok(())
}
