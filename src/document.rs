// src/document.rs
//! Respondent documents: dotted-path field lookup and loading from disk.
//!
//! Documents are arbitrary JSON objects. Lookups never fail; a missing key,
//! a non-object intermediate or a non-string leaf simply yields `None`.

use crate::error::{NormaliseError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Follows a dotted path such as `responses.about_user.study_field`.
#[must_use]
pub fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |value, key| value.as_object().and_then(|obj| obj.get(key)))
}

/// The string at `path`, or `None` when absent or not a string.
#[must_use]
pub fn text_at<'a>(doc: &'a Value, path: &str) -> Option<&'a str> {
    lookup(doc, path).and_then(Value::as_str)
}

/// The string at `path` when present and not blank.
#[must_use]
pub fn non_blank_at<'a>(doc: &'a Value, path: &str) -> Option<&'a str> {
    text_at(doc, path).filter(|s| !s.trim().is_empty())
}

/// Loads documents from a JSON array file, a single JSON object, a
/// JSON-lines file, or a directory of `*.json` files (walked recursively,
/// sorted by path).
///
/// # Errors
/// Returns error if a file cannot be read or does not parse.
pub fn load_documents(path: &Path) -> Result<Vec<Value>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let is_json = entry.path().extension().is_some_and(|e| e == "json");
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }
        let mut docs = Vec::new();
        for file in files {
            docs.extend(load_file(&file)?);
        }
        return Ok(docs);
    }
    load_file(path)
}

fn load_file(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|source| NormaliseError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_documents(&content).map_err(|source| NormaliseError::Json {
        source,
        path: path.to_path_buf(),
    })
}

/// Parses a JSON array, a single object, or JSON lines.
///
/// # Errors
/// Returns the first parse error encountered.
pub fn parse_documents(content: &str) -> std::result::Result<Vec<Value>, serde_json::Error> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }
    if let Ok(single) = serde_json::from_str::<Value>(trimmed) {
        return Ok(vec![single]);
    }
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Value>(line))
        .collect()
}
