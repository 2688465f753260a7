//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Commands, EngineArgs};
use super::handlers::{
    build_normaliser, handle_normalise, handle_payloads, handle_rules, handle_summary,
};
use crate::error::NormaliseError;
use crate::exit::FieldnormExit;
use anyhow::Result;
use tracing::warn;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, engine: &EngineArgs) -> Result<FieldnormExit> {
    let normaliser = build_normaliser(engine)?;

    let result = match command {
        Commands::Summary {
            input,
            format,
            details,
        } => handle_summary(&normaliser, &input, format, details),
        Commands::Normalise {
            input,
            field,
            category,
            format,
        } => handle_normalise(&normaliser, &input, &field, category.as_deref(), format),
        Commands::Payloads { input } => handle_payloads(&normaliser, &input),
        Commands::Rules => Ok(handle_rules(&normaliser)),
    };

    result.or_else(|e| {
        if e.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<NormaliseError>(),
                Some(NormaliseError::Json { .. })
            )
        }) {
            warn!("invalid input: {e:#}");
            return Ok(FieldnormExit::InvalidInput);
        }
        Err(e)
    })
}
