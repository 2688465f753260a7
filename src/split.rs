// src/split.rs
//! Splitting combined answers such as "biology and chemistry" into their
//! components.
//!
//! A cleaned value is first cut at every standalone "and". Each piece that
//! names two or more known components ("maths physics") is replaced by those
//! components; other pieces are kept whole. Components are matched on whole
//! words, longest first, so "further maths" is not also counted as "maths".

use crate::clean::is_unknown;

const CONJUNCTION: &str = "and";

/// Components of a cleaned value, in text order without repeats. A value
/// with nothing to split comes back as its only component.
#[must_use]
pub fn split_components(value: &str, components: &[String]) -> Vec<String> {
    if components.is_empty() || is_unknown(value) {
        return vec![value.to_string()];
    }

    let tokens: Vec<&str> = value.split_whitespace().collect();
    let mut parts = Vec::new();
    for chunk in tokens.split(|t| *t == CONJUNCTION) {
        if chunk.is_empty() {
            continue;
        }
        let found = known_components(chunk, components);
        if found.len() > 1 {
            parts.extend(found);
        } else {
            parts.push(chunk.join(" "));
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(parts.len());
    for part in parts {
        if !unique.contains(&part) {
            unique.push(part);
        }
    }
    if unique.is_empty() {
        unique.push(value.to_string());
    }
    unique
}

// `components` must be sorted longest first.
fn known_components(chunk: &[&str], components: &[String]) -> Vec<String> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < chunk.len() {
        let hit = components.iter().find(|c| {
            let words: Vec<&str> = c.split(' ').collect();
            chunk[i..].starts_with(&words)
        });
        match hit {
            Some(component) => {
                found.push(component.clone());
                i += component.split(' ').count();
            }
            None => i += 1,
        }
    }
    found
}
