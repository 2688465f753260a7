pub mod canonical;
pub mod clean;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod document;
pub mod error;
pub mod exit;
pub mod mapping;
pub mod normalise;
pub mod report;
pub mod rulebook;
pub mod similarity;
pub mod split;
pub mod stats;

pub use clean::UNKNOWN;
pub use cluster::{ClusterStrategy, FrequencyTable};
pub use config::EngineConfig;
pub use error::{NormaliseError, Result};
pub use normalise::{NormalisationResult, Normaliser};
pub use stats::{Aggregation, StatsAggregator};
