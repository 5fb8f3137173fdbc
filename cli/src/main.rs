mod formatter;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use ruleform::{record_from_json_str, ActionRules, Engine, Record, Value};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ruleform")]
#[command(about = "Rules written by people, evaluated by machines.")]
#[command(
    long_about = "Ruleform compiles short conditions such as [age] > 18 and [state] = 'TX' and evaluates them against field values.\nThe CLI lets you evaluate, inspect and validate rules, or run a set of input actions against a record."
)]
#[command(version)]
struct Cli {
    /// Log engine internals (compilation, operator lookups) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rule against field values
    ///
    /// Fields come from name=value arguments and/or a JSON object file.
    /// Arguments override fields of the same name from the file.
    Eval {
        /// Rule text, e.g. "[age] > 18 and [state] = 'TX'"
        rule: String,
        /// Field values (format: name=value)
        ///
        /// Examples: age=30, state=TX, "first name=Ada"
        fields: Vec<String>,
        /// JSON file holding a flat object of field values
        #[arg(short = 'd', long = "data")]
        data: Option<PathBuf>,
        /// Output the raw value only (for piping to other tools)
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// List the fields a rule references
    Vars {
        /// Rule text
        rule: String,
    },
    /// Validate a rule and show its prefix form
    Check {
        /// Rule text
        rule: String,
    },
    /// Evaluate input actions against field values
    ///
    /// FILE holds a JSON array of {"input", "action", "rule"} registrations.
    /// Prints, per input, the actions whose rules hold.
    Actions {
        /// JSON file with action registrations
        file: PathBuf,
        /// Field values (format: name=value)
        fields: Vec<String>,
        /// JSON file holding a flat object of field values
        #[arg(short = 'd', long = "data")]
        data: Option<PathBuf>,
    },
}

#[derive(Debug, Deserialize)]
struct Registration {
    input: String,
    action: String,
    rule: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Eval {
            rule,
            fields,
            data,
            raw,
        } => eval_command(rule, fields, data.as_deref(), *raw),
        Commands::Vars { rule } => vars_command(rule),
        Commands::Check { rule } => check_command(rule),
        Commands::Actions { file, fields, data } => actions_command(file, fields, data.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ruleform=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "ruleform=warn".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn eval_command(rule: &str, fields: &[String], data: Option<&Path>, raw: bool) -> Result<()> {
    let record = load_record(fields, data)?;

    let mut engine = Engine::new();
    engine.parse(rule, rule)?;
    let result = engine.execute(rule, &record)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_result(rule, &result, raw));
    Ok(())
}

fn vars_command(rule: &str) -> Result<()> {
    let compiled = Engine::new().compile(rule)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_variables(&compiled.variables()));
    Ok(())
}

fn check_command(rule: &str) -> Result<()> {
    let compiled = Engine::new().compile(rule)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_compiled(&compiled));
    Ok(())
}

fn actions_command(file: &Path, fields: &[String], data: Option<&Path>) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Cannot read actions file {}", file.display()))?;
    let registrations: Vec<Registration> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid actions file {}", file.display()))?;

    let mut rules = ActionRules::new();
    for registration in registrations {
        rules.add(registration.input, &registration.action, &registration.rule)?;
    }

    let record = load_record(fields, data)?;
    let triggered = rules.evaluate_all(&record)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_actions(&triggered));
    Ok(())
}

/// Build a record from an optional JSON file, then apply name=value fields.
fn load_record(fields: &[String], data: Option<&Path>) -> Result<Record> {
    let mut record = match data {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Cannot read data file {}", path.display()))?;
            record_from_json_str(&contents)?
        }
        None => Record::new(),
    };

    for field in fields {
        let (name, value) = parse_field(field)?;
        record.insert(name, value);
    }
    Ok(record)
}

fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((name, raw)) = field.split_once('=') else {
        bail!("Invalid field '{}': expected name=value", field);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid field '{}': missing name", field);
    }

    let value = match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => match Decimal::from_str(raw.trim()) {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(raw.to_string()),
        },
    };
    Ok((name.to_string(), value))
}
