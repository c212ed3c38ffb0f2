use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use std::path::{Path, PathBuf};

use crate::{amount::Amount, error::Result, ledger::Ledger};

/// Defines the output format: one row per code.
#[derive(Debug, Serialize)]
struct Row<'a> {
    code: &'a str,
    name: &'a str,
    total: Amount,
}

/// Writes the totals in `ledger` to `file_name` in directory `dir`, and
/// returns the path written.
///
/// The report has one line per code, in master file order:
///
/// ```txt
/// CODE,DISPLAY_NAME,TOTAL
/// ```
///
/// The report is first written to a temporary file in `dir` and then renamed
/// into place, so an existing report is only replaced once the new one is
/// complete.
///
/// # Errors
///
/// Returns [`crate::Error::Unknown`] for any failure creating, writing or
/// renaming the file.
pub fn write(dir: impl AsRef<Path>, file_name: &str, ledger: &Ledger) -> Result<PathBuf> {
    let path = dir.as_ref().join(file_name);
    let mut tmp = NamedTempFile::new_in(dir.as_ref())?;
    {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(tmp.as_file_mut());
        for (code, name) in ledger.registry.iter() {
            let total = ledger.totals.get(code).unwrap_or_default();
            wtr.serialize(Row { code, name, total })?;
        }
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| e.error)?;
    debug!(?path, rows = ledger.registry.len(), "wrote report");
    Ok(path)
}
