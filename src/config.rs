use regex::Regex;

use std::fmt::Display;

use crate::amount::Amount;

/// A kind of entity that sales are totalled by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Branch,
    Commodity,
}

impl Dimension {
    /// The name used for this dimension in user-facing messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Branch => "支店",
            Dimension::Commodity => "商品",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Branch => f.write_str("branch"),
            Dimension::Commodity => f.write_str("commodity"),
        }
    }
}

/// File names and code format for one [`Dimension`].
#[derive(Clone, Debug)]
pub struct DimensionConfig {
    pub dimension: Dimension,
    pub master_file: String,
    pub output_file: String,
    pub code_pattern: Regex,
}

impl DimensionConfig {
    /// Creates a dimension configuration.
    ///
    /// `code_pattern` should be anchored (`^...$`), since codes are checked
    /// with [`Regex::is_match`].
    ///
    /// # Errors
    ///
    /// Returns any errors from compiling `code_pattern` with [`Regex::new`].
    pub fn new(
        dimension: Dimension,
        master_file: &str,
        output_file: &str,
        code_pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            dimension,
            master_file: master_file.to_string(),
            output_file: output_file.to_string(),
            code_pattern: Regex::new(code_pattern)?,
        })
    }

    /// Branches: `branch.lst` / `branch.out`, codes of exactly three digits.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn branch() -> Result<Self, regex::Error> {
        Self::new(Dimension::Branch, "branch.lst", "branch.out", r"^[0-9]{3}$")
    }

    /// Commodities: `commodity.lst` / `commodity.out`, codes of exactly eight
    /// ASCII letters or digits.
    ///
    /// # Errors
    ///
    /// Only if the built-in pattern fails to compile.
    pub fn commodity() -> Result<Self, regex::Error> {
        Self::new(
            Dimension::Commodity,
            "commodity.lst",
            "commodity.out",
            r"^[A-Za-z0-9]{8}$",
        )
    }
}

/// Everything a run needs to know besides the input directory.
///
/// Build one with [`Config::branch_only`] or [`Config::with_commodities`]
/// and pass it by reference to [`crate::run`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Dimensions in the order their codes appear in a record file.
    pub dimensions: Vec<DimensionConfig>,
    pub record_pattern: Regex,
    /// Totals must stay below `10^max_digits`.
    pub max_digits: u32,
}

impl Config {
    /// Totals sales per branch only. Record files hold two lines.
    ///
    /// # Errors
    ///
    /// Only if a built-in pattern fails to compile.
    pub fn branch_only() -> Result<Self, regex::Error> {
        Self::new(vec![DimensionConfig::branch()?])
    }

    /// Totals sales per branch and per commodity. Record files hold three
    /// lines: branch code, commodity code, amount.
    ///
    /// # Errors
    ///
    /// Only if a built-in pattern fails to compile.
    pub fn with_commodities() -> Result<Self, regex::Error> {
        Self::new(vec![
            DimensionConfig::branch()?,
            DimensionConfig::commodity()?,
        ])
    }

    fn new(dimensions: Vec<DimensionConfig>) -> Result<Self, regex::Error> {
        Ok(Self {
            dimensions,
            record_pattern: Regex::new(r"^[0-9]{8}\.rcd$")?,
            max_digits: 10,
        })
    }

    /// The smallest total that aborts a run.
    ///
    /// Saturates at `u64::MAX` if `max_digits` is too large for a `u64`.
    #[must_use]
    pub fn ceiling(&self) -> Amount {
        Amount::ceiling(self.max_digits).unwrap_or(Amount::new(u64::MAX))
    }

    /// Number of lines every record file must have: one code per dimension,
    /// then the amount.
    #[must_use]
    pub fn record_line_count(&self) -> usize {
        self.dimensions.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_pattern_accepts_only_three_ascii_digits() {
        let branch = DimensionConfig::branch().unwrap();
        assert!(branch.code_pattern.is_match("001"));
        for code in ["01", "0001", "a01", "00１", " 001", "001 "] {
            assert!(!branch.code_pattern.is_match(code), "{code:?}");
        }
    }

    #[test]
    fn commodity_pattern_accepts_only_eight_alphanumerics() {
        let commodity = DimensionConfig::commodity().unwrap();
        assert!(commodity.code_pattern.is_match("SFT00001"));
        assert!(commodity.code_pattern.is_match("abcd1234"));
        for code in ["SFT0001", "SFT000001", "SFT-0001", "ＳFT00001"] {
            assert!(!commodity.code_pattern.is_match(code), "{code:?}");
        }
    }

    #[test]
    fn record_pattern_matches_eight_digits_and_rcd_extension() {
        let config = Config::branch_only().unwrap();
        assert!(config.record_pattern.is_match("00000001.rcd"));
        for name in ["0000001.rcd", "00000001.RCD", "00000001.rcd.bak", "0000000a.rcd"] {
            assert!(!config.record_pattern.is_match(name), "{name:?}");
        }
    }

    #[test]
    fn record_line_count_fn_counts_dimensions_plus_amount() {
        assert_eq!(Config::branch_only().unwrap().record_line_count(), 2);
        assert_eq!(Config::with_commodities().unwrap().record_line_count(), 3);
    }

    #[test]
    fn ceiling_fn_uses_max_digits() {
        let mut config = Config::branch_only().unwrap();
        assert_eq!(config.ceiling(), Amount::new(10_000_000_000));
        config.max_digits = 3;
        assert_eq!(config.ceiling(), Amount::new(1000));
    }
}
