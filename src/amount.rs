use serde_with::SerializeDisplay;
use thiserror::Error;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents a non-negative sales amount.
///
/// Amounts are whole numbers with no currency unit or decimal places. The
/// [`Display`] implementation prints the bare integer, which is also the form
/// used in report files.
#[derive(Clone, Copy, Default, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns `10^digits`, the smallest amount with more than `digits`
    /// decimal digits, or `None` if that does not fit in a `u64`.
    #[must_use]
    pub fn ceiling(digits: u32) -> Option<Self> {
        10u64.checked_pow(digits).map(Self)
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a string could not be read as an [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount must be a non-empty string of decimal digits, got {0:?}")]
    Malformed(String),

    #[error("amount {0} does not fit in 64 bits")]
    TooLarge(String),
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses a string of ASCII decimal digits.
    ///
    /// Signs, separators, decimal points and whitespace are all rejected, so
    /// `"+5"`, `"1,000"`, `"10.0"` and `""` are [`ParseAmountError::Malformed`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::Malformed(s.to_string()));
        }
        s.parse()
            .map(Self)
            .map_err(|_| ParseAmountError::TooLarge(s.to_string()))
    }
}
