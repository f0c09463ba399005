use crate::cli::Outcome;
use crate::config::RunContext;
use crate::{parser, validator, Result};
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// Dry-run architecture validation of the compiled stylesheet
pub fn run(ctx: &RunContext, stylesheet: Option<&Path>, json: bool) -> Result<Outcome> {
    let path = match resolve_stylesheet(ctx, stylesheet)? {
        Some(path) => path,
        None => {
            if json {
                println!("{{\"status\": \"skipped\", \"reason\": \"no stylesheet found\"}}");
            } else {
                println!(
                    "{}",
                    "No compiled stylesheet found; nothing to validate.".yellow()
                );
            }
            return Ok(Outcome::Clean);
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read stylesheet '{}'", path.display()))?;
    let extraction = parser::extract(&text)?;
    let report = validator::validate(&extraction);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}",
            format!(
                "Validating {} ({} tokens)",
                path.display(),
                extraction.definitions.len()
            )
            .cyan()
        );
        print!("{}", report.render());
    }

    if report.has_errors() {
        Ok(Outcome::Blocked)
    } else {
        Ok(Outcome::Clean)
    }
}

/// Resolve the stylesheet path: an explicit path must exist, otherwise the
/// first existing candidate wins and total absence is a soft skip.
pub fn resolve_stylesheet(
    ctx: &RunContext,
    explicit: Option<&Path>,
) -> Result<Option<std::path::PathBuf>> {
    match explicit {
        Some(path) => {
            let resolved = ctx.resolve(path);
            if !resolved.exists() {
                anyhow::bail!("Stylesheet '{}' does not exist", resolved.display());
            }
            Ok(Some(resolved))
        }
        None => Ok(ctx.locate_stylesheet()),
    }
}
