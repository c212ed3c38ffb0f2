use tracing::debug;

use std::{collections::HashMap, path::Path};

use crate::{
    amount::Amount,
    config::{Dimension, DimensionConfig},
    error::{Error, Result},
    lines::read_lines,
};

/// Display names by code, in the order codes first appear in a master file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `code` with display name `name`.
    ///
    /// If `code` is already present its name is replaced, but it keeps its
    /// original position.
    pub fn insert(&mut self, code: &str, name: &str) {
        match self.index.get(code) {
            Some(&i) => self.entries[i].1 = name.to_string(),
            None => {
                self.index.insert(code.to_string(), self.entries.len());
                self.entries.push((code.to_string(), name.to_string()));
            }
        }
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    #[must_use]
    pub fn name(&self, code: &str) -> Option<&str> {
        self.index.get(code).map(|&i| self.entries[i].1.as_str())
    }

    /// Iterates over `(code, name)` pairs in master file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Running sales totals by code.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Totals(HashMap<String, Amount>);

impl Totals {
    /// Creates totals of zero for every code in `registry`.
    #[must_use]
    pub fn zeroed(registry: &Registry) -> Self {
        Self(
            registry
                .iter()
                .map(|(code, _)| (code.to_string(), Amount::ZERO))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<Amount> {
        self.0.get(code).copied()
    }

    /// Adds `amount` to the total for `code` and returns the new total.
    ///
    /// Returns `None`, leaving totals unchanged, if `code` is unknown or the
    /// sum does not fit in a `u64`.
    pub fn add(&mut self, code: &str, amount: Amount) -> Option<Amount> {
        let total = self.0.get_mut(code)?;
        *total = total.checked_add(amount)?;
        Some(*total)
    }
}

/// The registry and running totals for one [`Dimension`].
///
/// To load a ledger from a master file, use [`Ledger::load`].
#[derive(Debug, Clone)]
pub struct Ledger {
    pub dimension: Dimension,
    pub registry: Registry,
    pub totals: Totals,
}

impl Ledger {
    /// Creates a ledger with every code in `registry` at zero.
    #[must_use]
    pub fn new(dimension: Dimension, registry: Registry) -> Self {
        let totals = Totals::zeroed(&registry);
        Self {
            dimension,
            registry,
            totals,
        }
    }

    /// Reads the master file for `config` from directory `dir`.
    ///
    /// The master file lists codes and display names, one per line, in the
    /// following format:
    ///
    /// ```txt
    /// CODE,DISPLAY_NAME
    /// ```
    ///
    /// `CODE` must match the dimension's code pattern in full and
    /// `DISPLAY_NAME` must not be empty. Further commas make the line
    /// invalid.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file does not exist ([`Error::MissingFile`])
    /// * A line has an invalid format ([`Error::InvalidMasterFormat`])
    /// * The file cannot be opened or read ([`Error::Unknown`])
    pub fn load(dir: impl AsRef<Path>, config: &DimensionConfig) -> Result<Self> {
        let path = dir.as_ref().join(&config.master_file);
        if !path.is_file() {
            return Err(Error::MissingFile(config.dimension));
        }
        let mut registry = Registry::new();
        for (i, line) in read_lines(&path)?.iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            let [code, name] = fields[..] else {
                debug!(?path, line = i + 1, fields = fields.len(), "wrong field count");
                return Err(Error::InvalidMasterFormat {
                    dimension: config.dimension,
                    line: i + 1,
                });
            };
            if !config.code_pattern.is_match(code) || name.is_empty() {
                debug!(?path, line = i + 1, code, "bad code or empty name");
                return Err(Error::InvalidMasterFormat {
                    dimension: config.dimension,
                    line: i + 1,
                });
            }
            registry.insert(code, name);
        }
        debug!(?path, codes = registry.len(), "loaded master file");
        Ok(Self::new(config.dimension, registry))
    }
}
