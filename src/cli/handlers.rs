// src/cli/handlers.rs
//! Handlers for each `fieldnorm` subcommand.

use super::args::{EngineArgs, OutputFormat};
use crate::config::EngineConfig;
use crate::document;
use crate::exit::FieldnormExit;
use crate::normalise::Normaliser;
use crate::report;
use crate::stats::StatsAggregator;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::warn;

/// Builds the engine from config file and command-line overrides.
///
/// # Errors
/// Returns error if the config cannot be loaded or an override is invalid.
pub fn build_normaliser(args: &EngineArgs) -> Result<Normaliser> {
    let mut config = EngineConfig::load(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy.into());
    }
    config.validate()?;
    Ok(Normaliser::new(config))
}

fn load(input: &Path) -> Result<Option<Vec<Value>>> {
    let docs = document::load_documents(input)
        .with_context(|| format!("Failed to load documents from {}", input.display()))?;
    if docs.is_empty() {
        warn!(path = %input.display(), "no documents found");
        return Ok(None);
    }
    Ok(Some(docs))
}

/// # Errors
/// Returns error if documents cannot be loaded.
pub fn handle_summary(
    normaliser: &Normaliser,
    input: &Path,
    format: OutputFormat,
    details: bool,
) -> Result<FieldnormExit> {
    let Some(docs) = load(input)? else {
        return Ok(FieldnormExit::InvalidInput);
    };

    let aggregation = StatsAggregator::new(normaliser).aggregate(&docs);
    let mut output = report::format_report(&aggregation, format.as_str());

    if details && format == OutputFormat::Markdown {
        output.push('\n');
        output.push_str(&report::format_normalisation_details(&aggregation.colleges, "College"));
        output.push('\n');
        output.push_str(&report::format_normalisation_details(&aggregation.subjects, "Subject"));
    }

    println!("{output}");
    Ok(FieldnormExit::Success)
}

/// # Errors
/// Returns error if documents cannot be loaded.
pub fn handle_normalise(
    normaliser: &Normaliser,
    input: &Path,
    field: &str,
    category: Option<&str>,
    format: OutputFormat,
) -> Result<FieldnormExit> {
    let Some(docs) = load(input)? else {
        return Ok(FieldnormExit::InvalidInput);
    };

    let result = normaliser.normalise_field(&docs, field, category);

    match format {
        OutputFormat::Json => {
            let out = json!({
                "field": field,
                "category": category,
                "original_to_canonical": result.original_to_canonical,
                "cluster_info": result.cluster_info,
                "components": result.components,
                "groups": result.groups,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Markdown | OutputFormat::Terminal => {
            println!("{}", report::format_normalisation_details(&result, field));
            for (label, count) in result.counts() {
                println!("{label}: {count}");
            }
        }
    }
    Ok(FieldnormExit::Success)
}

/// # Errors
/// Returns error if documents cannot be loaded.
pub fn handle_payloads(normaliser: &Normaliser, input: &Path) -> Result<FieldnormExit> {
    let Some(docs) = load(input)? else {
        return Ok(FieldnormExit::InvalidInput);
    };

    let aggregation = StatsAggregator::new(normaliser)
        .with_updates(true)
        .aggregate(&docs);
    let updates = aggregation.updates.unwrap_or_default();
    println!("{}", report::format_updates_json(&updates));
    Ok(FieldnormExit::Success)
}

/// Lists configured categories and their rule counts.
#[must_use]
pub fn handle_rules(normaliser: &Normaliser) -> FieldnormExit {
    let config = normaliser.config();
    println!(
        "{} threshold={} mapping={} strategy={}",
        "engine".cyan().bold(),
        config.cluster_threshold,
        config.mapping_threshold,
        config.strategy.label()
    );
    for name in config.rulebook.categories() {
        if let Some(profile) = config.rulebook.profile(Some(name)) {
            println!(
                "   {:<12} {} patterns, {} synonym groups, {} known names, {} acronyms, {} components",
                name,
                profile.patterns.len(),
                profile.synonyms.len(),
                profile.known_names.len(),
                profile.acronyms.len(),
                profile.components.len()
            );
        }
    }
    FieldnormExit::Success
}
