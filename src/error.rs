// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormaliseError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pattern in category '{category}': {source}")]
    Regex {
        category: String,
        source: regex::Error,
    },

    #[error("Threshold {name} must be within [0, 1], got {value}")]
    Threshold { name: &'static str, value: f64 },

    #[error("Invalid document JSON: {source} (path: {path})")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NormaliseError>;

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for NormaliseError {
    fn from(e: walkdir::Error) -> Self {
        NormaliseError::Other(e.to_string())
    }
}
