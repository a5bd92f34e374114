//! `health_cli` runs a calculator on a JSON input bundle and prints the result bundle.
//!
//! ```text
//! health_cli run macro --input form.json --pretty
//! echo '{"values":{"lmpDate":"2026-01-01"}}' | health_cli run due-date --today 2026-04-01
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use health_core::input::parse_date;
use health_core::{CalculatorInput, CalculatorKind, EngineSettings, LocaleStrings};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Health calculator command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Subcommand.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one calculator on an input bundle.
    Run(RunArgs),
    /// List available calculators.
    List,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Calculator id or alias (macro, protein, due-date).
    #[arg(value_parser = parse_kind)]
    calculator: CalculatorKind,
    /// JSON input bundle; reads stdin when omitted or `-`.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Locale strings JSON (`{"values": {...}, "formats": {...}}`), replaces any `t` in the bundle.
    #[arg(long, env = "HEALTH_CALC_LOCALE", value_name = "FILE")]
    locale: Option<PathBuf>,
    /// Engine settings JSON.
    #[arg(long, env = "HEALTH_CALC_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long, env = "HEALTH_CALC_TODAY", value_parser = parse_today)]
    today: Option<NaiveDate>,
    /// Print only the summary sentence.
    #[arg(long)]
    summary_only: bool,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn parse_kind(value: &str) -> Result<CalculatorKind, String> {
    CalculatorKind::parse(value).ok_or_else(|| {
        let known: Vec<&str> = CalculatorKind::ALL.iter().map(|k| k.id()).collect();
        format!("unknown calculator `{}` (expected one of {})", value, known.join(", "))
    })
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date("today", value).map_err(|err| err.to_string())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List => {
            for kind in CalculatorKind::ALL {
                println!("{:<14} {}", kind.id(), kind.display_name());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(args) => run(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("health_core={level},health_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let mut input = load_input(args.input.as_deref())?;
    if let Some(path) = &args.locale {
        let locale: LocaleStrings = read_json(path).context("failed to load locale strings")?;
        debug!(labels = locale.values.len(), formats = locale.formats.len(), "locale loaded");
        input.t = Some(locale);
    }

    let settings = match &args.settings {
        Some(path) => read_json::<EngineSettings>(path).context("failed to load engine settings")?,
        None => EngineSettings::default(),
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    info!(calculator = args.calculator.id(), %today, "running calculator");
    let result = args.calculator.run(&input, today, &settings);
    if !result.is_valid {
        warn!(calculator = args.calculator.id(), "input bundle rejected");
    }

    if args.summary_only {
        println!("{}", result.summary);
    } else if args.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn load_input(path: Option<&Path>) -> anyhow::Result<CalculatorInput> {
    let text = match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))?
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input bundle from stdin")?;
            buf
        }
    };
    CalculatorInput::from_json(&text).map_err(|err| anyhow!("invalid input bundle: {}", err))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}
