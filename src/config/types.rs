use crate::cluster::ClusterStrategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk shape of `fieldnorm.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldnormToml {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryToml>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    #[serde(default = "default_cluster_threshold")]
    pub cluster_threshold: f64,
    #[serde(default = "default_mapping_threshold")]
    pub mapping_threshold: f64,
    #[serde(default)]
    pub strategy: ClusterStrategy,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            cluster_threshold: default_cluster_threshold(),
            mapping_threshold: default_mapping_threshold(),
            strategy: ClusterStrategy::default(),
        }
    }
}

pub const fn default_cluster_threshold() -> f64 { 0.85 }
pub const fn default_mapping_threshold() -> f64 { 0.9 }

/// Rules for one category tag, as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryToml {
    /// Regex substitutions applied in order after lowercasing.
    #[serde(default)]
    pub patterns: Vec<PatternToml>,
    /// Canonical name -> known aliases.
    #[serde(default)]
    pub synonyms: Vec<SynonymToml>,
    /// Whole-value rescue rules for recurring names.
    #[serde(default)]
    pub known_names: Vec<KnownNameToml>,
    /// Tokens kept upper-case in display labels.
    #[serde(default)]
    pub acronyms: Vec<String>,
    /// Known component names; when set, combined answers such as
    /// "biology and chemistry" are split into them.
    #[serde(default)]
    pub components: Vec<String>,
    /// Trailing words stripped before known-name matching.
    #[serde(default)]
    pub suffixes: Vec<String>,
    /// Appended to a single-word value that had no suffix.
    #[serde(default)]
    pub default_suffix: Option<String>,
    /// Drop the repeated word in "a b a" runs.
    #[serde(default)]
    pub collapse_repeats: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternToml {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymToml {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownNameToml {
    pub pattern: String,
    pub label: String,
}
