//! Command-line interface for specmd
//! This binary builds specifications from lexer token streams and writes them back out.
//!
//! Usage:
//!   specmd `<tokens.json>` [--concepts `<tokens.json>`...] [--format `<format>`] [--config `<file>`]
//!   specmd --concepts `<tokens.json>`... --format concepts
//!
//! Diagnostics go to stderr. The exit status is 1 when any error diagnostic was reported, or any
//! warning when `diagnostics.fail_on_warnings` is set.

mod input;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use specmd::spec::formats::{CanonicalFormatter, FormatError, FormatRegistry};
use specmd::{build_concepts, build_specification, ConceptDictionary, Diagnostic};
use specmd_config::{Loader, SpecmdConfig, SpecmdConfigError};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const FORMATS: [&str; 6] = [
    "canonical",
    "treeviz",
    "ast-json",
    "ast-yaml",
    "diagnostics",
    "concepts",
];

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] input::InputError),
    #[error("configuration error: {0}")]
    Config(#[from] SpecmdConfigError),
    #[error("error writing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("error writing YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("format '{0}' needs a specification path")]
    MissingSpec(String),
}

/// Diagnostics collected from every input file
#[derive(Default)]
struct Report {
    by_file: Vec<(String, Vec<Diagnostic>)>,
}

impl Report {
    fn add(&mut self, path: &str, diagnostics: Vec<Diagnostic>) {
        if !diagnostics.is_empty() {
            self.by_file.push((path.to_string(), diagnostics));
        }
    }

    fn all(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_file.iter().flat_map(|(_, diagnostics)| diagnostics)
    }

    fn failed(&self, fail_on_warnings: bool) -> bool {
        self.all().any(Diagnostic::is_error) || (fail_on_warnings && self.all().next().is_some())
    }

    fn print(&self) {
        for (path, diagnostics) in &self.by_file {
            for diagnostic in diagnostics {
                eprintln!("{}: {}", path, diagnostic);
            }
        }
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        let map: BTreeMap<&str, &Vec<Diagnostic>> = self
            .by_file
            .iter()
            .map(|(path, diagnostics)| (path.as_str(), diagnostics))
            .collect();
        serde_json::to_string_pretty(&map)
    }
}

fn main() {
    let matches = Command::new("specmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and canonically format test specifications from lexer token streams")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Token stream (JSON) of the specification")
                .required_unless_present("concepts")
                .index(1),
        )
        .arg(
            Arg::new("concepts")
                .long("concepts")
                .short('C')
                .help("Token stream (JSON) of a concept file; may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(PossibleValuesParser::new(FORMATS))
                .default_value("canonical"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .get_matches();

    init_tracing();

    let path = matches.get_one::<String>("path").map(String::as_str);
    let concepts: Vec<&str> = matches
        .get_many::<String>("concepts")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("canonical");
    let config_path = matches.get_one::<String>("config").map(String::as_str);

    match run(path, &concepts, format, config_path) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(config_path: Option<&str>) -> Result<SpecmdConfig, SpecmdConfigError> {
    match config_path {
        Some(path) => Loader::new().with_file(path).build(),
        None => Loader::new().build(),
    }
}

/// Returns whether the run passed the diagnostics gate
fn run(
    path: Option<&str>,
    concept_paths: &[&str],
    format: &str,
    config_path: Option<&str>,
) -> Result<bool, CliError> {
    let config = load_config(config_path)?;
    let canonical = CanonicalFormatter::with_options(config.formatting.to_format_options());
    let mut report = Report::default();

    let mut dictionary = ConceptDictionary::new();
    for concept_path in concept_paths {
        let tokens = input::read_tokens(Path::new(concept_path))?;
        let diagnostics = build_concepts(&tokens, concept_path, &mut dictionary);
        report.add(concept_path, diagnostics);
    }
    let linked = dictionary.link_nested_invocations();
    tracing::debug!(
        concepts = dictionary.len(),
        linked,
        "concept dictionary ready"
    );

    let output = if format == "concepts" {
        serde_json::to_string_pretty(&canonical.format_concepts(&dictionary))?
    } else {
        let path = path.ok_or_else(|| CliError::MissingSpec(format.to_string()))?;
        let tokens = input::read_tokens(Path::new(path))?;
        let (spec, diagnostics) = build_specification(&tokens, &dictionary);
        report.add(path, diagnostics);

        match format {
            "ast-json" => serde_json::to_string_pretty(&spec)?,
            "ast-yaml" => serde_yaml::to_string(&spec)?,
            "diagnostics" => report.to_json()?,
            name => FormatRegistry::with_canonical(canonical).serialize(&spec, name)?,
        }
    };

    if format != "diagnostics" {
        report.print();
    }
    print!("{}", output);
    if format == "concepts" || format == "ast-json" || format == "diagnostics" {
        println!();
    }

    Ok(!report.failed(config.diagnostics.fail_on_warnings))
}
