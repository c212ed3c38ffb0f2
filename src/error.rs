//! Error type for a run. Every variant's [`Display`](std::fmt::Display) is
//! the exact message shown to the user; diagnostic detail lives in the
//! fields and in [`Cause`], which is exposed through `source()` for logging.
use thiserror::Error;

use crate::config::Dimension;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("予期せぬエラーが発生しました")]
    Unknown(#[source] Cause),

    #[error("{}定義ファイルが存在しません", .0.label())]
    MissingFile(Dimension),

    #[error("{}定義ファイルのフォーマットが不正です", .dimension.label())]
    InvalidMasterFormat { dimension: Dimension, line: usize },

    #[error("売上ファイル名が連番になっていません")]
    NonSequentialRecordFiles { before: String, after: String },

    #[error("{file}のフォーマットが不正です")]
    RecordFormatInvalid { file: String, lines: usize },

    #[error("{file}の{}コードが不正です", .dimension.label())]
    UnknownEntityCode {
        file: String,
        dimension: Dimension,
        code: String,
    },

    #[error("合計金額が{max_digits}桁を超えました")]
    AmountOverflow { file: String, max_digits: u32 },
}

/// The underlying reason for an [`Error::Unknown`].
#[derive(Debug, Error)]
pub enum Cause {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("malformed amount {value:?} in {file}")]
    MalformedAmount { file: String, value: String },

    #[error("usage: {0}")]
    Usage(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Unknown(Cause::Io(e))
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Unknown(Cause::Csv(e))
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Error::Unknown(Cause::Pattern(e))
    }
}

impl Error {
    pub fn usage<E: std::fmt::Display>(e: E) -> Self {
        Error::Unknown(Cause::Usage(e.to_string()))
    }
}
