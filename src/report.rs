// src/report.rs
//! Output formatting for aggregation results.
//!
//! Markdown mirrors the tables the dashboard renders, terminal output is a
//! coloured summary for humans, and JSON is for machines.

use crate::normalise::NormalisationResult;
use crate::stats::{Aggregation, DocumentUpdate, FieldStats, StatRow};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Formats the aggregation according to the specified format.
#[must_use]
pub fn format_report(aggregation: &Aggregation, format: &str) -> String {
    match format {
        "json" => format_json(aggregation),
        "terminal" => format_terminal(aggregation),
        _ => format_markdown(&aggregation.stats),
    }
}

/// Demographic tables, subject list and course-type table in Markdown.
#[must_use]
pub fn format_markdown(stats: &FieldStats) -> String {
    let mut out = String::new();

    write_table(&mut out, "Gender", &stats.rows(&stats.gender));
    write_table(&mut out, "College", &stats.rows(&stats.college));
    write_table(&mut out, "Age Group", &stats.rows(&stats.age_group));
    write_table(&mut out, "Subject", &stats.rows(&stats.subjects));

    writeln!(out).ok();
    writeln!(out, "### Subjects Mentioned").ok();
    for row in stats.rows(&stats.subject_mentions) {
        writeln!(out, "- {} ({})", row.label, row.count).ok();
    }

    write_table(&mut out, "Course Type", &stats.rows(&stats.course_types));
    out
}

fn write_table(out: &mut String, heading: &str, rows: &[StatRow]) {
    writeln!(out).ok();
    writeln!(out, "| {heading} | Count | Percentage |").ok();
    writeln!(
        out,
        "|{}|-------|------------|",
        "-".repeat(heading.len() + 2)
    )
    .ok();
    for row in rows {
        writeln!(out, "| {} | {} | {}% |", row.label, row.count, row.percentage).ok();
    }
}

/// "N variations" details for every label that absorbed more than one
/// distinct raw spelling, largest first.
#[must_use]
pub fn format_normalisation_details(result: &NormalisationResult, category_name: &str) -> String {
    let mut out = String::new();
    writeln!(out, "### {category_name} Normalisation Details").ok();

    let mut labels: Vec<(&String, Vec<&str>)> = result
        .cluster_info
        .keys()
        .map(|label| (label, result.variations(label)))
        .filter(|(_, variations)| variations.len() > 1)
        .collect();
    labels.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    if labels.is_empty() {
        writeln!(out, "No merged variations.").ok();
        return out;
    }

    for (label, variations) in labels {
        writeln!(out).ok();
        writeln!(out, "**{label}** ({} variations)", variations.len()).ok();
        for raw in variations {
            writeln!(out, "- \"{raw}\"").ok();
        }
    }
    out
}

/// Coloured summary for terminal display.
#[must_use]
pub fn format_terminal(aggregation: &Aggregation) -> String {
    let stats = &aggregation.stats;
    let mut out = String::new();

    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(out, "{}", " FIELD NORMALISATION SUMMARY ".cyan().bold()).ok();
    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    writeln!(out).ok();
    writeln!(
        out,
        "   Documents analysed: {}",
        stats.total_documents.to_string().white()
    )
    .ok();
    writeln!(out).ok();

    write_section(&mut out, "GENDER", &stats.rows(&stats.gender));
    write_section(&mut out, "COLLEGE", &stats.rows(&stats.college));
    write_section(&mut out, "AGE GROUP", &stats.rows(&stats.age_group));
    write_section(&mut out, "SUBJECT", &stats.rows(&stats.subjects));
    write_section(&mut out, "SUBJECTS MENTIONED", &stats.rows(&stats.subject_mentions));
    write_section(&mut out, "COURSE TYPES", &stats.rows(&stats.course_types));

    write_merges(&mut out, "College", &aggregation.colleges);
    write_merges(&mut out, "Subject", &aggregation.subjects);

    writeln!(out, "{}", "─".repeat(70).dimmed()).ok();
    out
}

fn write_section(out: &mut String, title: &str, rows: &[StatRow]) {
    writeln!(out, "{}", title.cyan().bold()).ok();
    if rows.is_empty() {
        writeln!(out, "   {}", "none".dimmed()).ok();
    }
    for row in rows {
        writeln!(
            out,
            "   {:<40} {:>5}  {:>4}%  {}",
            row.label,
            row.count.to_string().yellow(),
            row.percentage,
            row.range.label().dimmed()
        )
        .ok();
    }
    writeln!(out).ok();
}

fn write_merges(out: &mut String, name: &str, result: &NormalisationResult) {
    let merged: BTreeMap<&str, usize> = result
        .groups
        .iter()
        .filter(|g| g.members.len() > 1)
        .map(|g| (g.label.as_str(), g.members.len()))
        .collect();
    if merged.is_empty() {
        return;
    }
    writeln!(out, "{}", format!("{name} merges").cyan().bold()).ok();
    for (label, spellings) in merged {
        writeln!(out, "   {} {label} ← {spellings} spellings", "•".dimmed()).ok();
    }
    writeln!(out).ok();
}

/// Stats plus cluster audit info as pretty JSON.
#[must_use]
pub fn format_json(aggregation: &Aggregation) -> String {
    serde_json::to_string_pretty(aggregation).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Update payloads as a JSON array.
#[must_use]
pub fn format_updates_json(updates: &[DocumentUpdate]) -> String {
    serde_json::to_string_pretty(updates).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
