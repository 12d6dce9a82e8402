//! CLI for rendering placeholder templates.
//!
//! ## Usage
//!
//! ```bash
//! # Positional fixtures
//! bi --fixtures '["dana"]' 'Hello %{0|u}'
//!
//! # Named fixtures, non-strict mode
//! bi --options '{"strict": false}' --fixtures '{"name": "dana"}' '%{name} %{missing}'
//!
//! # Auto filters, JSON output
//! bi --auto-filters h --json --fixtures '["<b>"]' '%{0}' '%{0|-}'
//!
//! # Show the builtin filters
//! bi --list-filters
//!
//! # Generate shell completions
//! source <(COMPLETE=bash bi)
//! ```

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use biscuit_interpolate::{BUILTIN_FILTERS, Fixtures, InterpolateError, Interpolator};

/// Render %{name|filters} placeholder templates against JSON fixtures
#[derive(Parser)]
#[command(name = "bi", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Templates to render
    #[arg(value_name = "TEMPLATE", required_unless_present = "list_filters")]
    templates: Vec<String>,

    /// Engine options as a JSON object, e.g. '{"strict": false}'
    #[arg(short, long, value_name = "JSON")]
    options: Option<String>,

    /// Fixtures as JSON: an array (positional) or an object (named)
    #[arg(short, long, value_name = "JSON")]
    fixtures: Option<String>,

    /// Auto filters applied to every placeholder, e.g. "th"
    #[arg(short, long, value_name = "SPECIFIERS")]
    auto_filters: Option<String>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,

    /// List the builtin filters and exit
    #[arg(long)]
    list_filters: bool,
}

const AFTER_HELP: &str = "\
PLACEHOLDERS:
  %{name}            value of fixture `name` (positional fixtures are 0, 1, ...)
  %{name|ul}         value passed through filters `u` then `l`
  %{name|-}          value without auto filters
  \\%{name}           literal %{name}

SHELL COMPLETIONS:
  Bash (~/.bashrc):
    source <(COMPLETE=bash bi)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh bi)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish bi | source

EXAMPLES:
  bi -f '[\"dana\"]' 'Hi %{0|u}'                 # Hi DANA
  bi -f '{\"q\": \"a b\"}' '/search?q=%{q|r}'     # /search?q=a%20b
  bi -o '{\"strict\": false}' '[%{missing}]'     # []
";

/// Errors reported by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error("InvalidArgument: --{flag} is not valid JSON: {source}")]
    Json {
        flag: &'static str,
        source: serde_json::Error,
    },

    #[error("InvalidArgument: --options must be a JSON object")]
    OptionsNotObject,

    #[error("{}: {}", .0.kind(), .0)]
    Engine(#[from] InterpolateError),
}

/// One rendered template, as printed by `--json`.
#[derive(Serialize)]
struct Rendered {
    template: String,
    result: String,
}

fn main() -> ExitCode {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        return generate_completions(&shell_name);
    }

    // Setup logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if cli.list_filters {
        print_filters();
        return ExitCode::SUCCESS;
    }

    let rendered = match render_all(&cli) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&rendered) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize output: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for Rendered { template, result } in &rendered {
            println!("{template} -> {result}");
        }
    }

    ExitCode::SUCCESS
}

/// Builds the engine from the CLI flags and renders every template.
///
/// Nothing is returned unless every template renders.
fn render_all(cli: &Cli) -> Result<Vec<Rendered>, CliError> {
    let engine = build_engine(cli)?;
    let fixtures = match cli.fixtures.as_deref() {
        Some(json) => Fixtures::from(parse_json("fixtures", json)?),
        None => Fixtures::new(),
    };

    tracing::debug!(
        templates = cli.templates.len(),
        fixtures = fixtures.len(),
        strict = engine.options().strict,
        "rendering templates"
    );

    cli.templates
        .iter()
        .map(|template| -> Result<Rendered, CliError> {
            let result = engine.render(template, &fixtures)?;
            Ok(Rendered {
                template: template.clone(),
                result: result.into_owned(),
            })
        })
        .collect()
}

fn build_engine(cli: &Cli) -> Result<Interpolator, CliError> {
    let mut engine = Interpolator::new();

    if let Some(json) = cli.options.as_deref() {
        let Value::Object(options) = parse_json("options", json)? else {
            return Err(CliError::OptionsNotObject);
        };
        engine.set_options(&options)?;
    }

    if let Some(specifiers) = cli.auto_filters.as_deref() {
        engine.set_auto_filters(specifiers.chars())?;
    }

    Ok(engine)
}

fn parse_json(flag: &'static str, json: &str) -> Result<Value, CliError> {
    serde_json::from_str(json).map_err(|source| CliError::Json { flag, source })
}

/// Print the builtin filter table.
fn print_filters() {
    for builtin in BUILTIN_FILTERS {
        println!("{}  {}", builtin.specifier, builtin.description);
    }
}

/// Generate shell completions.
fn generate_completions(shell_name: &str) -> ExitCode {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            eprintln!(
                "Unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            );
            return ExitCode::FAILURE;
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "bi", &mut io::stdout());
    ExitCode::SUCCESS
}
