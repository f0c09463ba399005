use crate::cli::{validate, Outcome};
use crate::config::RunContext;
use crate::models::{DiffCategory, DiffEntry};
use crate::parser::{batch, Extraction};
use crate::{diff as diff_engine, external, parser, Result};
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// Dry-run: normalize the batch and classify it against the local tokens.
/// Inspects but never writes.
pub fn run(ctx: &RunContext, batch_path: &Path, stylesheet: Option<&Path>) -> Result<Outcome> {
    let raw = batch::load(&ctx.resolve(batch_path))?;

    let tokens = match external::normalize_batch(&raw)? {
        Ok(tokens) => tokens,
        Err(report) => {
            println!(
                "{}",
                "External batch failed validation; nothing was diffed.".red()
            );
            print!("{}", report.render());
            return Ok(Outcome::Blocked);
        }
    };

    let extraction = load_local(ctx, stylesheet)?;
    let entries = diff_engine::classify(&tokens, &extraction.definitions);

    render(&entries);
    Ok(Outcome::Clean)
}

/// Extract local tokens, or an empty set when no stylesheet exists
pub fn load_local(ctx: &RunContext, stylesheet: Option<&Path>) -> Result<Extraction> {
    match validate::resolve_stylesheet(ctx, stylesheet)? {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read stylesheet '{}'", path.display()))?;
            parser::extract(&text)
        }
        None => Ok(Extraction::default()),
    }
}

/// Print classified entries grouped by category
pub fn render(entries: &[DiffEntry]) {
    let count = |category: DiffCategory| entries.iter().filter(|e| e.category == category).count();

    for entry in entries {
        match entry.category {
            DiffCategory::New => {
                if let Some(new) = &entry.new_value {
                    println!("{} {} = {}", "+ NEW      ".green(), entry.name, new);
                }
            }
            DiffCategory::Modified => {
                if let (Some(old), Some(new)) = (&entry.old_value, &entry.new_value) {
                    println!(
                        "{} {} : {} -> {}",
                        "~ MODIFIED ".yellow(),
                        entry.name,
                        old,
                        new
                    );
                }
            }
            DiffCategory::Removed => {
                println!("{} {}", "- REMOVED  ".red(), entry.name);
            }
            DiffCategory::Unchanged => {}
        }
    }

    println!(
        "{}",
        format!(
            "{} new, {} modified, {} removed, {} unchanged",
            count(DiffCategory::New),
            count(DiffCategory::Modified),
            count(DiffCategory::Removed),
            count(DiffCategory::Unchanged)
        )
        .cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_batch_blocks_before_diff() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("tokens-export.json"),
            r#"{"tokens": [{"name": "base.radius.card", "value": "4px"}]}"#,
        )
        .unwrap();
        let ctx = RunContext::load(temp.path()).unwrap();

        let outcome = run(&ctx, Path::new("tokens-export.json"), None).unwrap();
        assert_eq!(outcome, Outcome::Blocked);
    }

    #[test]
    fn test_valid_batch_against_empty_local_set() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("tokens-export.json"),
            r##"{"tokens": [{"name": "primitive.color.blue", "value": "#00f"}]}"##,
        )
        .unwrap();
        let ctx = RunContext::load(temp.path()).unwrap();

        let outcome = run(&ctx, Path::new("tokens-export.json"), None).unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn test_missing_batch_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let ctx = RunContext::load(temp.path()).unwrap();

        assert!(run(&ctx, Path::new("tokens-export.json"), None).is_err());
    }
}
