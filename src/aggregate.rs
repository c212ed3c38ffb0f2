use tracing::debug;

use std::str::FromStr;

use crate::{
    amount::{Amount, ParseAmountError},
    config::Config,
    error::{Cause, Error, Result},
    ledger::Ledger,
    lines::read_lines,
    records::RecordFile,
};

/// Reads each record file in order and adds its amount to `ledgers`.
///
/// `ledgers` must match `config.dimensions`, in the same order. A record file
/// holds `config.record_line_count()` lines: one code per ledger, followed by
/// the amount:
///
/// ```txt
/// 001
/// SFT00001
/// 1000
/// ```
///
/// The amount is added to the total of each code. Every total must stay
/// below `config.ceiling()`.
///
/// # Errors
///
/// Stops at the first problem, leaving totals as they were at that point:
/// * [`Error::RecordFormatInvalid`] if a file has the wrong number of lines
/// * [`Error::UnknownEntityCode`] if a code is not in its ledger's registry
/// * [`Error::Unknown`] if a file cannot be read, the amount is not a string
///   of decimal digits, or `ledgers` does not match `config`
/// * [`Error::AmountOverflow`] if a total reaches the ceiling
pub fn aggregate(files: &[RecordFile], ledgers: &mut [Ledger], config: &Config) -> Result<()> {
    if ledgers.len() != config.dimensions.len() {
        return Err(Error::usage(format!(
            "{} ledgers for {} dimensions",
            ledgers.len(),
            config.dimensions.len()
        )));
    }
    for file in files {
        read_record(file, ledgers, config)?;
    }
    Ok(())
}

fn read_record(file: &RecordFile, ledgers: &mut [Ledger], config: &Config) -> Result<()> {
    let lines = read_lines(&file.path)?;
    if lines.len() != config.record_line_count() {
        return Err(Error::RecordFormatInvalid {
            file: file.name.clone(),
            lines: lines.len(),
        });
    }
    let (amount_line, codes) = lines.split_last().ok_or_else(|| Error::RecordFormatInvalid {
        file: file.name.clone(),
        lines: 0,
    })?;
    for (code, ledger) in codes.iter().zip(ledgers.iter()) {
        if !ledger.registry.contains(code) {
            return Err(Error::UnknownEntityCode {
                file: file.name.clone(),
                dimension: ledger.dimension,
                code: code.clone(),
            });
        }
    }
    let overflow = || Error::AmountOverflow {
        file: file.name.clone(),
        max_digits: config.max_digits,
    };
    let amount = match Amount::from_str(amount_line) {
        Ok(amount) => amount,
        Err(ParseAmountError::Malformed(value)) => {
            return Err(Error::Unknown(Cause::MalformedAmount {
                file: file.name.clone(),
                value,
            }))
        }
        Err(ParseAmountError::TooLarge(_)) => return Err(overflow()),
    };
    let ceiling = config.ceiling();
    for (code, ledger) in codes.iter().zip(ledgers.iter_mut()) {
        let total = ledger.totals.add(code, amount).ok_or_else(overflow)?;
        debug!(file = %file.name, dimension = %ledger.dimension, %code, %amount, %total, "added");
        if total >= ceiling {
            return Err(overflow());
        }
    }
    Ok(())
}
