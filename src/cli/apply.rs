use crate::cli::{diff as diff_cmd, Outcome};
use crate::config::RunContext;
use crate::review::{self, prompt::PromptSource, BatchSource, DecisionSource, ReviewPlan};
use crate::state::{artifacts, RegistryStore};
use crate::{diff as diff_engine, external, parser::batch, validator, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Flags of the apply workflow
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Accept all NEW/MODIFIED without prompting; never touches REMOVED
    pub non_interactive: bool,
    /// Named scope for the generated fragments
    pub scope: Option<String>,
    /// Force global `:root` scoping regardless of configured scope
    pub global: bool,
    /// Where the artifacts are written
    pub out_dir: Option<PathBuf>,
    /// Explicit stylesheet path
    pub stylesheet: Option<PathBuf>,
}

/// Full workflow: validate local tokens, normalize the batch, diff, review,
/// merge into the registry, write artifacts.
pub fn run(ctx: &RunContext, batch_path: &Path, opts: &ApplyOptions) -> Result<Outcome> {
    // 1. Local architecture must be sound before any review; an absent
    //    stylesheet means an empty local set, not a failure. A stylesheet
    //    with rules but no definitions still gets validated, so apply and
    //    validate agree on what blocks.
    let extraction = diff_cmd::load_local(ctx, opts.stylesheet.as_deref())?;
    if !extraction.is_empty() {
        let report = validator::validate(&extraction);
        if report.has_errors() {
            println!(
                "{}",
                "Local token architecture is invalid; fix it before applying external changes."
                    .red()
            );
            print!("{}", report.render());
            return Ok(Outcome::Blocked);
        }
    }

    // 2. Normalize the batch; an invalid batch is never diffed or reviewed
    let raw = batch::load(&ctx.resolve(batch_path))?;
    let tokens = match external::normalize_batch(&raw)? {
        Ok(tokens) => tokens,
        Err(report) => {
            println!(
                "{}",
                "External batch failed validation; nothing was reviewed.".red()
            );
            print!("{}", report.render());
            return Ok(Outcome::Blocked);
        }
    };

    // 3. Diff and build the review queue
    let entries = diff_engine::classify(&tokens, &extraction.definitions);
    let mut store = RegistryStore::load(&ctx.registry_path)?;
    let plan = ReviewPlan::build(&entries, store.registry(), !opts.non_interactive);

    if plan.is_empty() {
        println!("{}", "Nothing to apply; local tokens are up to date.".green());
        return Ok(Outcome::Clean);
    }

    // 4. Review
    let mut interactive_source = PromptSource;
    let mut batch_source = BatchSource;
    let source: &mut dyn DecisionSource = if opts.non_interactive {
        &mut batch_source
    } else {
        &mut interactive_source
    };
    let outcome = review::run(&plan, source);

    if outcome.accepted.is_empty() {
        return Ok(if outcome.interrupted {
            println!("{}", "Review interrupted; nothing was approved or written.".yellow());
            Outcome::Interrupted
        } else if outcome.aborted {
            println!("{}", "Review aborted; nothing was approved or written.".yellow());
            Outcome::Aborted
        } else {
            println!("{}", "No entries approved; nothing to write.".yellow());
            Outcome::Clean
        });
    }

    // 5. Merge the accepted subset and persist the registry
    let merged = store.apply(&outcome.accepted);
    store.save_if_dirty()?;

    // 6. Emit artifacts from the merged state
    let scope = effective_scope(ctx, opts);
    let out_dir = opts
        .out_dir
        .as_deref()
        .map(|dir| ctx.resolve(dir))
        .unwrap_or_else(|| ctx.out_dir.clone());
    let planned = artifacts::plan(store.registry(), scope.as_deref(), &out_dir)?;
    let written = artifacts::write_all(&planned)?;

    println!(
        "{}",
        format!("Merged {} change(s) into {}", merged, store.path().display()).green()
    );
    for path in &written {
        println!("  wrote {}", path.display());
    }
    if outcome.aborted {
        println!(
            "{}",
            "Review ended early; only the approved subset was written.".yellow()
        );
    }

    if outcome.interrupted {
        Ok(Outcome::Interrupted)
    } else {
        Ok(Outcome::Clean)
    }
}

fn effective_scope(ctx: &RunContext, opts: &ApplyOptions) -> Option<String> {
    if opts.global {
        return None;
    }
    opts.scope.clone().or_else(|| ctx.default_scope.clone())
}
