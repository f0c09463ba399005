//! Interactive decision source backed by dialoguer

use super::{Decision, DecisionSource, Interrupted};
use crate::models::{DiffCategory, DiffEntry};
use colored::Colorize;
use dialoguer::Select;

/// Prompts the operator for each pending entry
#[derive(Debug, Default)]
pub struct PromptSource;

impl PromptSource {
    fn describe(category: DiffCategory, entry: &DiffEntry, position: usize, total: usize) {
        println!();
        println!(
            "{} {}",
            format!("[{} {}/{}]", category.label(), position, total).cyan().bold(),
            entry.name.bold()
        );
        match category {
            DiffCategory::New => {
                if let Some(new) = &entry.new_value {
                    println!("   value: {}", new.green());
                }
            }
            DiffCategory::Modified => {
                if let (Some(old), Some(new)) = (&entry.old_value, &entry.new_value) {
                    println!("   local:    {}", old.red());
                    println!("   proposed: {}", new.green());
                }
            }
            DiffCategory::Removed => {
                if let Some(old) = &entry.old_value {
                    println!(
                        "   override {} is absent from the export",
                        old.yellow()
                    );
                }
            }
            DiffCategory::Unchanged => {}
        }
    }
}

impl DecisionSource for PromptSource {
    fn decide(
        &mut self,
        category: DiffCategory,
        entry: &DiffEntry,
        position: usize,
        total: usize,
    ) -> Result<Decision, Interrupted> {
        Self::describe(category, entry, position, total);

        let items = [
            "Accept",
            "Reject",
            "Accept all remaining in this category",
            "Reject all remaining in this category",
            "Abort review",
        ];

        // Any prompt failure (Ctrl-C, closed terminal) is the abort decision
        // for the current and all remaining entries.
        let selection = Select::new()
            .items(&items)
            .default(0)
            .interact()
            .map_err(|_| Interrupted)?;

        Ok(match selection {
            0 => Decision::Accept,
            1 => Decision::Reject,
            2 => Decision::AcceptRemaining,
            3 => Decision::RejectRemaining,
            _ => Decision::Abort,
        })
    }
}
