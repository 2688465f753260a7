// src/clean.rs
//! Text cleaning: the first stage every raw value passes through.
//!
//! Output is either the [`UNKNOWN`] sentinel or a lowercase string with no
//! punctuation and single spaces between tokens.

use crate::rulebook::CategoryProfile;
use regex::Regex;
use std::sync::LazyLock;

/// Sentinel label for absent, empty or fully-redacted values.
pub const UNKNOWN: &str = "Unknown";

/// Category rules can expose new matches once an earlier rule has fired
/// ("level level 3 3"), so cleaning repeats until the value settles.
const MAX_PASSES: usize = 8;

static REDACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\[redacted:.*?\]").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap_or_else(|_| panic!("Invalid Regex")));
static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Cleans one raw value under an optional category profile.
///
/// Absent, empty and whitespace-only input, input left empty once redaction
/// markers and qualifier words are gone, and the literal word "unknown" all
/// yield [`UNKNOWN`]. When a value carrying a redaction marker would end up
/// as [`UNKNOWN`], the profile's known-name rules get one chance to recover
/// it from the full text, marker included.
#[must_use]
pub fn clean_text(text: Option<&str>, profile: Option<&CategoryProfile>) -> String {
    let Some(text) = text else {
        return UNKNOWN.to_string();
    };
    if text.trim().is_empty() {
        return UNKNOWN.to_string();
    }

    let redacted = REDACTION_RE.is_match(text);
    let stripped = REDACTION_RE.replace_all(text, "").to_lowercase();
    let cleaned = settle(stripped, profile);

    if !cleaned.is_empty() && !cleaned.eq_ignore_ascii_case(UNKNOWN) {
        return cleaned;
    }
    if redacted {
        let rescued = profile
            .and_then(|p| p.known_name(&squash(&text.to_lowercase())))
            .filter(|label| !label.eq_ignore_ascii_case(UNKNOWN));
        if let Some(label) = rescued {
            return label.to_string();
        }
    }
    UNKNOWN.to_string()
}

/// Replaces punctuation with spaces, collapses whitespace and trims.
/// Case is left alone.
#[must_use]
pub fn squash(text: &str) -> String {
    let spaced = PUNCT_RE.replace_all(text, " ");
    SPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

#[must_use]
pub fn is_unknown(value: &str) -> bool {
    value == UNKNOWN
}

fn settle(mut value: String, profile: Option<&CategoryProfile>) -> String {
    for _ in 0..MAX_PASSES {
        let next = pass(&value, profile);
        if next == value {
            break;
        }
        value = next;
    }
    value
}

fn pass(value: &str, profile: Option<&CategoryProfile>) -> String {
    let Some(profile) = profile else {
        return squash(value);
    };

    let mut text = value.to_string();
    for rule in &profile.patterns {
        text = rule
            .pattern
            .replace_all(&text, rule.replacement.as_str())
            .into_owned();
    }
    let mut text = squash(&text);
    if profile.collapse_repeats {
        text = collapse_repeats(&text);
    }
    if text.is_empty() {
        return text;
    }

    let (stem, suffix) = profile.strip_suffix(&text);
    match profile.known_name(stem) {
        Some(label) => label.to_string(),
        None => profile.restore_suffix(stem, suffix),
    }
}

/// Drops the repeat in every "a b a" run: "newcastle college newcastle"
/// becomes "newcastle college".
fn collapse_repeats(text: &str) -> String {
    let tokens: Vec<&str> = text.split(' ').collect();
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        out.push(tokens[i]);
        if i + 2 < tokens.len() && tokens[i] == tokens[i + 2] {
            out.push(tokens[i + 1]);
            i += 3;
        } else {
            i += 1;
        }
    }
    out.join(" ")
}
