// src/config/mod.rs
pub mod types;

pub use self::types::{CategoryToml, EngineSection, FieldnormToml};

use crate::cluster::ClusterStrategy;
use crate::error::{NormaliseError, Result};
use crate::rulebook::Rulebook;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "fieldnorm.toml";

/// Immutable engine configuration, built once and handed to the normaliser.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub cluster_threshold: f64,
    pub mapping_threshold: f64,
    pub strategy: ClusterStrategy,
    pub rulebook: Rulebook,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let engine = EngineSection::default();
        Self {
            cluster_threshold: engine.cluster_threshold,
            mapping_threshold: engine.mapping_threshold,
            strategy: engine.strategy,
            rulebook: Rulebook::builtin(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, or `fieldnorm.toml` from the working directory when it
    /// exists, or falls back to the built-in defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None if Path::new(CONFIG_FILE).is_file() => Self::from_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| NormaliseError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml(&content)
    }

    /// Parses TOML content. Categories in the file replace built-in
    /// categories of the same name; others are kept.
    ///
    /// # Errors
    /// Returns error on malformed TOML, bad patterns or out-of-range thresholds.
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: FieldnormToml = toml::from_str(content)?;
        let custom = Rulebook::compile(&raw.categories)?;
        let config = Self {
            cluster_threshold: raw.engine.cluster_threshold,
            mapping_threshold: raw.engine.mapping_threshold,
            strategy: raw.engine.strategy,
            rulebook: Rulebook::builtin().merged(custom),
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.cluster_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: ClusterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_rulebook(mut self, rulebook: Rulebook) -> Self {
        self.rulebook = rulebook;
        self
    }

    /// # Errors
    /// Returns error if a threshold lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_unit("cluster_threshold", self.cluster_threshold)?;
        check_unit("mapping_threshold", self.mapping_threshold)
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(NormaliseError::Threshold { name, value })
    }
}
