// src/stats/detect.rs
//! Keyword detection over free text: course types and subject mentions.
//!
//! Each label is reported at most once per document, in table order.

use regex::Regex;
use std::sync::LazyLock;

struct Detector {
    label: &'static str,
    patterns: Vec<Regex>,
}

fn detector(label: &'static str, patterns: &[&str]) -> Detector {
    Detector {
        label,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).unwrap_or_else(|_| panic!("Invalid Regex")))
            .collect(),
    }
}

static COURSE_TYPES: LazyLock<Vec<Detector>> = LazyLock::new(|| {
    vec![
        detector("A-levels", &[r"\b[aA][\s-]levels?\b|\b[aA] level\b"]),
        detector("BTECs", &[r"\bbtecs?\b|\bBTECs?\b"]),
        detector("Apprenticeships", &[r"\bapprenticeships?\b|\bApprenticeships?\b"]),
        detector("T-levels", &[r"\b[tT][\s-]levels?\b|\b[tT] level\b"]),
    ]
});

// Matched against lower-cased text.
static SUBJECTS: LazyLock<Vec<Detector>> = LazyLock::new(|| {
    vec![
        detector("Mathematics", &[r"\bmaths\b", r"\bmathematics\b", r"\bfurther maths\b"]),
        detector("Biology", &[r"\bbiology\b", r"\bbio\b"]),
        detector("Chemistry", &[r"\bchemistry\b", r"\bchem\b"]),
        detector("Physics", &[r"\bphysics\b"]),
        detector("Psychology", &[r"\bpsychology\b", r"\bpsych\b"]),
        detector("English", &[r"\benglish\b"]),
        detector(
            "Computer Science",
            &[r"\bcomputer science\b", r"\bcomputing\b", r"\binformation technology\b"],
        ),
        detector("Business", &[r"\bbusiness\b", r"\beconomics\b"]),
        detector(
            "Art & Design",
            &[r"\bart\b", r"\bdesign\b", r"\bgraphics\b", r"\bgraphic design\b"],
        ),
        detector("History", &[r"\bhistory\b"]),
        detector("Geography", &[r"\bgeography\b"]),
        detector("Sociology", &[r"\bsociology\b"]),
        detector(
            "Health & Social Care",
            &[r"\bhealth\b", r"\bsocial care\b", r"\bhealthcare\b"],
        ),
        detector("Engineering", &[r"\bengineering\b"]),
        detector("Media", &[r"\bmedia\b", r"\bjournalism\b"]),
        detector("Sport", &[r"\bsport\b", r"\bpe\b", r"\bphysical education\b"]),
        detector("Animal Management", &[r"\banimal\b"]),
    ]
});

fn matches(table: &[Detector], text: &str) -> Vec<String> {
    table
        .iter()
        .filter(|d| d.patterns.iter().any(|p| p.is_match(text)))
        .map(|d| d.label.to_string())
        .collect()
}

/// Course types mentioned in a transcript.
#[must_use]
pub fn course_types(transcript: &str) -> Vec<String> {
    if transcript.is_empty() {
        return Vec::new();
    }
    matches(&COURSE_TYPES, transcript)
}

/// Subjects mentioned across the study field and the transcript.
#[must_use]
pub fn subject_mentions(study_field: Option<&str>, transcript: Option<&str>) -> Vec<String> {
    let mut text = String::new();
    if let Some(field) = study_field.filter(|f| !f.is_empty()) {
        text.push_str(field);
        text.push(' ');
    }
    if let Some(t) = transcript {
        text.push_str(t);
    }
    if text.trim().is_empty() {
        return Vec::new();
    }
    matches(&SUBJECTS, &text.to_lowercase())
}
