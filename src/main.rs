use calculate_sales::{run, Config, Error};
use clap::{error::ErrorKind, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(version, about)]
/// Totals daily sales record files by branch (and optionally commodity).
struct Args {
    /// Directory holding the master files and the record files
    dir: PathBuf,

    /// Also total by commodity, using commodity.lst and three-line records
    #[arg(long)]
    commodity: bool,

    /// Log debug detail to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            init_logging(false);
            return fail(&Error::usage(e));
        }
    };
    init_logging(args.verbose);

    let config = if args.commodity {
        Config::with_commodities()
    } else {
        Config::branch_only()
    };
    let result = config
        .map_err(Error::from)
        .and_then(|config| run(&args.dir, &config));
    match result {
        Ok(summary) => {
            info!(records = summary.records, reports = ?summary.reports, "done");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the user-facing message for `err` and logs its causes.
fn fail(err: &Error) -> ExitCode {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    error!(error = ?err, ?causes, "run failed");
    println!("{err}");
    ExitCode::FAILURE
}
