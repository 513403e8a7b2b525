// ABOUTME: provides the `validate` cli that checks one action file against its tool schema.
// ABOUTME: prints a human or json report and exits 0 on pass, 1 on violations, 2 on usage errors.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use action_validate::report::render_outcome;
use action_validate::schema::DEFAULT_SCHEMA_DIR;
use action_validate::validator::Strategy;
use action_validate::{missing_argument, run, Options, Outcome, EXIT_USAGE};

#[derive(Debug, Parser)]
#[command(name = "validate", version, about = "Validate an action file against its tool schema")]
struct Args {
    /// Action json file to validate.
    action_file: Option<PathBuf>,

    /// Directory holding one `<action>.json` schema per action name.
    #[arg(long, default_value = DEFAULT_SCHEMA_DIR)]
    schema_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Auto)]
    strategy: Strategy,

    /// Print the verdict as json instead of the text report.
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_tracing(&args.log_level) {
        eprintln!("{err:#}");
        return ExitCode::from(EXIT_USAGE);
    }

    let outcome = match &args.action_file {
        Some(path) => run(
            path,
            &Options {
                schema_dir: args.schema_dir.clone(),
                strategy: args.strategy,
            },
        ),
        None => missing_argument(),
    };

    if let Err(err) = print_outcome(&outcome, args.json) {
        eprintln!("{err:#}");
        return ExitCode::from(EXIT_USAGE);
    }
    ExitCode::from(outcome.exit_code)
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid --log-level {filter:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))
}

fn print_outcome(outcome: &Outcome, json: bool) -> anyhow::Result<()> {
    let out = render_outcome(&outcome.verdict, json).context("serialize verdict")?;
    println!("{out}");
    Ok(())
}
