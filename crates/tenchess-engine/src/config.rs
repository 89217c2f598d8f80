//! Rules configuration loading.
//!
//! A rules file is plain TOML; every field is optional:
//!
//! ```toml
//! mode = "variant"        # or "classic"
//! tracking = "piece"      # or "square" for the legacy square-keyed state
//! giraffe = "alternating" # or "frozen" for giraffes that never switch
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::state::StateTracking;

/// Errors that can occur when loading a rules configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Which rule set to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Capture-driven transformations, abilities and the last-pawn conversion.
    #[default]
    Variant,
    /// Plain 10x10 chess with elephants and no transformations.
    Classic,
}

/// When a giraffe switches between knight and bishop movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiraffeToggle {
    /// Every move the giraffe makes flips it: knight, bishop, knight, ...
    #[default]
    Alternating,
    /// The move counter is never advanced, so giraffes always jump like knights.
    Frozen,
}

/// Rules configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub mode: Mode,
    pub tracking: StateTracking,
    pub giraffe: GiraffeToggle,
}

impl RulesConfig {
    /// Square-keyed state and frozen giraffes: the behavior of the first
    /// release of the variant.
    pub const fn legacy() -> Self {
        RulesConfig {
            mode: Mode::Variant,
            tracking: StateTracking::Square,
            giraffe: GiraffeToggle::Frozen,
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!("no rules file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
