#![doc = include_str!("../README.md")]
use tracing::info;

use std::path::{Path, PathBuf};

pub mod aggregate;
pub mod amount;
pub mod config;
pub mod error;
pub mod ledger;
mod lines;
pub mod records;
pub mod report;

pub use amount::Amount;
pub use config::{Config, Dimension, DimensionConfig};
pub use error::{Error, Result};
pub use ledger::{Ledger, Registry, Totals};
pub use records::RecordFile;

/// What a successful [`run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub reports: Vec<PathBuf>,
}

/// Totals the sales records in `dir` and writes one report per dimension.
///
/// The stages run in order, and the first failure ends the run:
///
/// 1. Load every master file named in `config` ([`Ledger::load`])
/// 2. Find the record files and check their numbering ([`records::discover`])
/// 3. Add up the amounts ([`aggregate::aggregate`])
/// 4. Write the reports ([`report::write`])
///
/// No report is written unless every record file was read successfully.
///
/// # Examples
///
/// ```no_run
/// use calculate_sales::{run, Config};
///
/// let config = Config::branch_only().unwrap();
/// let summary = run("sales/2024-04", &config).unwrap();
/// println!("{} record files", summary.records);
/// ```
///
/// # Errors
///
/// Returns the first [`Error`] met by any stage. Its [`Display`](std::fmt::Display)
/// is the message to show the user.
pub fn run(dir: impl AsRef<Path>, config: &Config) -> Result<Summary> {
    let dir = dir.as_ref();
    let mut ledgers = config
        .dimensions
        .iter()
        .map(|dim| Ledger::load(dir, dim))
        .collect::<Result<Vec<_>>>()?;
    let files = records::discover(dir, config)?;
    aggregate::aggregate(&files, &mut ledgers, config)?;
    info!(records = files.len(), "aggregated record files");
    let reports = config
        .dimensions
        .iter()
        .zip(&ledgers)
        .map(|(dim, ledger)| report::write(dir, &dim.output_file, ledger))
        .collect::<Result<Vec<_>>>()?;
    Ok(Summary {
        records: files.len(),
        reports,
    })
}
