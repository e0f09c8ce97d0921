//! sort-trace CLI.
//!
//! Thin wrapper over the trace engine: run an algorithm or a built-in
//! scenario, persist the trace, and verify saved traces by replay.

use clap::{ArgAction, Args, Parser, Subcommand};
use st_common::{Algorithm, Error, EventKind, Result};
use st_config::{resolve_config, LogFormat, PresetName};
use st_core::exit_codes::ExitCode;
use st_core::logging::init_logging;
use st_core::replay::{load_trace, scenarios, TraceFile};
use st_core::runner::{RunOutput, RunParams, Runner};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

#[derive(Parser, Debug)]
#[command(name = "sort-trace", version, about = "Record and replay sorting-algorithm traces")]
struct Cli {
    /// Path to a config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use a built-in config preset
    #[arg(long, global = true, value_enum)]
    preset: Option<PresetName>,

    /// Log output format (overrides config)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sort an input and emit its trace
    Run(RunArgs),

    /// Run a built-in scenario
    Scenario(ScenarioArgs),

    /// List built-in scenarios
    Scenarios {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a saved trace and check it against its recorded result
    Verify {
        /// Trace file written by `run --out` or `scenario --out`
        file: PathBuf,
    },

    /// Print the JSON Schema of trace files
    Schema,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Algorithm name (bubble, insertion, selection, merge, quick, counting)
    #[arg(short, long)]
    algorithm: String,

    /// Comma-separated integers
    #[arg(short, long, allow_hyphen_values = true)]
    input: String,

    /// Upper bound on values; required by counting sort
    #[arg(long)]
    max_value: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    name: String,

    /// Run under this algorithm instead of the scenario's own
    #[arg(short, long)]
    algorithm: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the trace file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Print a human-readable summary instead of the trace
    #[arg(long)]
    summary: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err).as_i32());
        }
    };
    let code = match run_cli(cli) {
        Ok(code) => code,
        Err(err) => {
            let code = ExitCode::from(&err);
            if code.is_error() {
                error!(code = err.code(), "{err}");
            } else {
                warn!(code = err.code(), "{err}");
            }
            eprintln!("error: {err}");
            code
        }
    };
    std::process::exit(code.as_i32());
}

/// `--help` and `--version` exit cleanly; any other parse failure is a
/// usage error.
fn usage_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::UsageError
    } else {
        ExitCode::Clean
    }
}

fn run_cli(cli: Cli) -> Result<ExitCode> {
    let resolved = resolve_config(cli.config.as_deref(), cli.preset)?;
    let format = cli.log_format.unwrap_or(resolved.config.logging.format);
    init_logging(&resolved.config.logging, format, cli.verbose)?;
    debug!(source = %resolved.source, "configuration resolved");

    let runner = Runner::new(resolved.config.trace);
    match cli.command {
        Command::Run(args) => cmd_run(&runner, &args),
        Command::Scenario(args) => cmd_scenario(&runner, &args),
        Command::Scenarios { json } => cmd_scenarios(json),
        Command::Verify { file } => cmd_verify(&file),
        Command::Schema => cmd_schema(),
    }
}

fn cmd_run(runner: &Runner, args: &RunArgs) -> Result<ExitCode> {
    let input = parse_input(&args.input)?;
    let params = RunParams {
        max_value: args.max_value,
    };
    let output = runner.run(&args.algorithm, &input, &params)?;
    emit(&input, &params, &output, &args.output)
}

fn cmd_scenario(runner: &Runner, args: &ScenarioArgs) -> Result<ExitCode> {
    let scenario = scenarios::by_name(&args.name)
        .ok_or_else(|| Error::InvalidParams(format!("unknown scenario: {}", args.name)))?;
    let algorithm = args.algorithm.as_deref().map(str::parse::<Algorithm>).transpose()?;
    let output = scenario.run(runner, algorithm)?;
    let params = scenario.params_for(output.trace.algorithm());
    emit(&scenario.input, &params, &output, &args.output)
}

fn cmd_scenarios(json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(&scenarios::all())?);
        return Ok(ExitCode::Clean);
    }
    for scenario in scenarios::all() {
        println!(
            "{:<16} {:<10} {}",
            scenario.name, scenario.algorithm, scenario.description
        );
    }
    Ok(ExitCode::Clean)
}

fn cmd_verify(path: &Path) -> Result<ExitCode> {
    let file: TraceFile<i64> = load_trace(path)?;
    let report = file.check();
    if !report.is_ok() {
        for violation in &report.violations {
            eprintln!("violation: {violation}");
        }
        return Ok(ExitCode::VerificationFailed);
    }

    println!(
        "ok: {} ({}, {} events, {} mutations)",
        file.run_id, file.algorithm, report.events, report.mutations
    );
    Ok(ExitCode::Clean)
}

fn cmd_schema() -> Result<ExitCode> {
    let schema = schemars::schema_for!(TraceFile<i64>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::Clean)
}

fn emit(
    input: &[i64],
    params: &RunParams,
    output: &RunOutput<i64>,
    args: &OutputArgs,
) -> Result<ExitCode> {
    let file = TraceFile::record(input, params, output)?;
    if let Some(path) = &args.out {
        file.save(path)?;
    }

    if args.summary || args.out.is_some() {
        print_summary(&file);
    } else {
        println!("{}", serde_json::to_string_pretty(&file)?);
    }
    Ok(ExitCode::Clean)
}

fn print_summary(file: &TraceFile<i64>) {
    println!("run:       {}", file.run_id);
    println!("algorithm: {}", file.algorithm);
    println!("input:     {:?}", file.input);
    println!("sorted:    {:?}", file.sorted);
    println!("events:    {}", file.events.len());
    for kind in EventKind::ALL {
        let count = file.events.iter().filter(|e| e.kind == kind).count();
        if count > 0 {
            println!("  {:<10} {count}", kind.as_str());
        }
    }
    println!("digest:    {}", file.digest);
}

fn parse_input(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| Error::InvalidParams(format!("bad input value {s:?}: {e}")))
        })
        .collect()
}
