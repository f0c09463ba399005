//! Approval workflow
//!
//! The review loop is an explicit state machine over a queue of categories
//! (NEW, then MODIFIED, then previously-overridden REMOVED), driven by one
//! decision enum. Decisions come from a [`DecisionSource`], so the machine is
//! unit-testable without a terminal; the dialoguer-backed source lives in
//! [`prompt`].

pub mod prompt;

use crate::models::{DiffCategory, DiffEntry};
use crate::state::UserRegistry;
use thiserror::Error;

/// The operator's decision for one pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Accept this entry
    Accept,
    /// Reject this entry
    Reject,
    /// Accept this and all remaining entries in the current category
    AcceptRemaining,
    /// Reject this and all remaining entries in the current category
    RejectRemaining,
    /// Abort the review entirely
    Abort,
}

/// Raised when the operator interrupts the review (e.g. Ctrl-C at a prompt).
/// Treated as the abort decision for the current and all remaining entries.
#[derive(Debug, Error)]
#[error("review interrupted by operator")]
pub struct Interrupted;

/// Supplies decisions for pending entries
pub trait DecisionSource {
    fn decide(
        &mut self,
        category: DiffCategory,
        entry: &DiffEntry,
        position: usize,
        total: usize,
    ) -> Result<Decision, Interrupted>;
}

/// Accepts every NEW/MODIFIED entry without prompting. Removals never reach
/// this source: reverting a manual override is destructive and requires
/// explicit confirmation, so batch plans exclude the REMOVED category.
#[derive(Debug, Default)]
pub struct BatchSource;

impl DecisionSource for BatchSource {
    fn decide(
        &mut self,
        _category: DiffCategory,
        _entry: &DiffEntry,
        _position: usize,
        _total: usize,
    ) -> Result<Decision, Interrupted> {
        Ok(Decision::AcceptRemaining)
    }
}

/// The ordered category queue for one review run
#[derive(Debug, Clone)]
pub struct ReviewPlan {
    categories: Vec<(DiffCategory, Vec<DiffEntry>)>,
}

impl ReviewPlan {
    /// Build the queue from a diff: NEW, then MODIFIED, then REMOVED.
    ///
    /// REMOVED is reviewable only interactively and only for names the
    /// operator previously overrode; everything else in that category is
    /// informational. UNCHANGED entries are never queued.
    pub fn build(entries: &[DiffEntry], registry: &UserRegistry, interactive: bool) -> Self {
        let collect = |category: DiffCategory| -> Vec<DiffEntry> {
            entries
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect()
        };

        let mut categories = vec![
            (DiffCategory::New, collect(DiffCategory::New)),
            (DiffCategory::Modified, collect(DiffCategory::Modified)),
        ];

        if interactive {
            let removals: Vec<DiffEntry> = entries
                .iter()
                .filter(|e| {
                    e.category == DiffCategory::Removed
                        && registry.overrides.contains_key(&e.name)
                })
                .cloned()
                .collect();
            categories.push((DiffCategory::Removed, removals));
        }

        categories.retain(|(_, entries)| !entries.is_empty());
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.categories.iter().map(|(_, e)| e.len()).sum()
    }
}

/// What the review produced
#[derive(Debug, Default)]
pub struct ReviewOutcome {
    /// Entries approved for merging, in review order
    pub accepted: Vec<DiffEntry>,
    /// Entries explicitly or stickily rejected
    pub rejected: usize,
    /// The operator aborted; undecided entries were discarded
    pub aborted: bool,
    /// The abort came from an external interrupt rather than a decision
    pub interrupted: bool,
}

/// Sticky per-category state after an accept-all or reject-all decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryMode {
    Prompt,
    AcceptAll,
    RejectAll,
}

/// Drive the state machine to completion.
///
/// Abort (decided or interrupted) preserves everything accepted so far,
/// including fully completed categories, and discards undecided entries.
pub fn run(plan: &ReviewPlan, source: &mut dyn DecisionSource) -> ReviewOutcome {
    let mut outcome = ReviewOutcome::default();

    'categories: for (category, entries) in &plan.categories {
        let total = entries.len();
        let mut mode = CategoryMode::Prompt;

        for (idx, entry) in entries.iter().enumerate() {
            match mode {
                CategoryMode::AcceptAll => {
                    outcome.accepted.push(entry.clone());
                    continue;
                }
                CategoryMode::RejectAll => {
                    outcome.rejected += 1;
                    continue;
                }
                CategoryMode::Prompt => {}
            }

            let decision = match source.decide(*category, entry, idx + 1, total) {
                Ok(decision) => decision,
                Err(Interrupted) => {
                    outcome.aborted = true;
                    outcome.interrupted = true;
                    break 'categories;
                }
            };

            match decision {
                Decision::Accept => outcome.accepted.push(entry.clone()),
                Decision::Reject => outcome.rejected += 1,
                Decision::AcceptRemaining => {
                    outcome.accepted.push(entry.clone());
                    mode = CategoryMode::AcceptAll;
                }
                Decision::RejectRemaining => {
                    outcome.rejected += 1;
                    mode = CategoryMode::RejectAll;
                }
                Decision::Abort => {
                    outcome.aborted = true;
                    break 'categories;
                }
            }
        }
    }

    outcome
}
