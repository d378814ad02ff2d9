//! TOML configuration.
//!
//! ```toml
//! compare_mode = "significant_digits_12"
//!
//! [elimination]
//! jordan_pivot_test = "contextual"
//! donor_reelimination = "full"
//! recovered_pivot = "use"
//! zero_decades = 10.0
//! ```
//!
//! Every key is optional and falls back to its default.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{elimination::EliminationOptions, CompareMode, Comparator};

/// Settings for comparisons and elimination.
///
/// There is no global configuration: a [`Config`] is loaded once and the [`Comparator`] and
/// [`EliminationOptions`] it describes are passed to the operations that need them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Equality model used for scalar, vector and matrix comparisons.
    pub compare_mode: CompareMode,
    pub elimination: EliminationOptions,
}

impl Config {
    /// Parses a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("failed to parse configuration")
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("failed to serialize configuration")
    }

    /// Returns the comparator selected by [`Config::compare_mode`].
    pub fn comparator(&self) -> Comparator {
        Comparator::new(self.compare_mode)
    }
}
