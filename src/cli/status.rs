use crate::cli::Outcome;
use crate::config::RunContext;
use crate::state::{ChangeAction, RegistryStore};
use crate::Result;
use colored::Colorize;

/// Summarize the persisted override registry
pub fn run(ctx: &RunContext) -> Result<Outcome> {
    let store = RegistryStore::load(&ctx.registry_path)?;
    let registry = store.registry();

    println!(
        "{}",
        format!("Registry: {}", store.path().display()).cyan().bold()
    );
    println!("   Overrides: {}", registry.overrides.len());
    println!("   Removed:   {}", registry.removed.len());
    println!("   Changelog: {} entries", registry.changelog.len());

    for entry in registry.changelog.iter().rev().take(5) {
        let action = match entry.action {
            ChangeAction::Add => "add   ".green(),
            ChangeAction::Update => "update".yellow(),
            ChangeAction::Remove => "remove".red(),
        };
        println!(
            "   {} {} {}",
            entry.at.format("%Y-%m-%d %H:%M"),
            action,
            entry.token
        );
    }

    Ok(Outcome::Clean)
}
