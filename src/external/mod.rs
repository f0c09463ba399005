//! External token normalization
//!
//! Converts a design-tool export into internal form and validates it with
//! the stricter external tier table. Tier is derived strictly from the first
//! dotted segment; only primitive, semantic and component are legal — the
//! code-only base tier must never be influenced by an external source. Any
//! violation blocks the entire batch before diffing.

use crate::graph::TokenGraph;
use crate::models::{
    ExternalBatch, ExternalToken, ReferencePolicy, Report, RuleKind, Tier, ValidationIssue,
};
use anyhow::Result;
use regex::Regex;
use std::collections::BTreeSet;

/// Convert a dotted external name to the internal hyphenated form
pub fn internal_name(dotted: &str) -> String {
    format!("--{}", dotted.trim().replace('.', "-"))
}

/// Convert `{dotted.ref}` value references to the internal `var()` form.
/// Literal values pass through unchanged.
pub fn internal_value(raw: &str, reference_re: &Regex) -> String {
    reference_re
        .replace_all(raw, |caps: &regex::Captures| {
            format!("var({})", internal_name(&caps[1]))
        })
        .into_owned()
}

/// Normalize and validate a whole batch.
///
/// Returns the normalized tokens, or the full violation report — an invalid
/// batch is never partially ingested.
pub fn normalize_batch(batch: &ExternalBatch) -> Result<std::result::Result<Vec<ExternalToken>, Report>> {
    let reference_re = Regex::new(r"\{([A-Za-z0-9_.-]+)\}")?;
    let var_re = Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)")?;

    let mut issues: Vec<ValidationIssue> = Vec::new();
    let mut tokens: Vec<ExternalToken> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for raw in &batch.tokens {
        let first_segment = raw.name.split('.').next().unwrap_or("");
        let tier = Tier::from_segment(first_segment);

        // Subjects always carry the internal name, even for rejected
        // entries, so report consumers key on one form.
        if !tier.externally_managed() {
            issues.push(ValidationIssue::error(
                RuleKind::TierViolation,
                internal_name(&raw.name),
                format!(
                    "external token '{}' uses tier '{}', which may not be supplied externally; allowed tiers: primitive, semantic, component",
                    raw.name, first_segment
                ),
            ));
            continue;
        }

        let name = internal_name(&raw.name);
        if !seen.insert(name.clone()) {
            issues.push(ValidationIssue::warning(
                RuleKind::DuplicateDefinition,
                name.clone(),
                format!(
                    "external token '{}' appears more than once; the first entry wins",
                    raw.name
                ),
            ));
            continue;
        }

        let value = internal_value(&raw.value, &reference_re);
        let references: Vec<String> = var_re
            .captures_iter(&value)
            .map(|c| c[1].to_string())
            .collect();

        tokens.push(ExternalToken {
            source_name: raw.name.clone(),
            source_value: raw.value.clone(),
            name,
            value,
            tier,
            references,
        });
    }

    // Adjacency under the stricter external table. The target tier comes
    // from the referenced name; the target need not be in the batch, since
    // externals may reference locally defined tokens.
    for token in &tokens {
        for reference in &token.references {
            let target = Tier::from_name(reference);
            if !token.tier.may_reference(target, ReferencePolicy::External) {
                issues.push(ValidationIssue::error(
                    RuleKind::TierViolation,
                    &token.name,
                    format!(
                        "{} token '{}' may reference {} but references {} token '{}'",
                        token.tier,
                        token.name,
                        token.tier.allowed_description(ReferencePolicy::External),
                        target,
                        reference
                    ),
                ));
            }
        }
    }

    // Cycle check runs against the external set alone
    let mut graph = TokenGraph::new();
    for token in &tokens {
        graph.add_node(&token.name, token.references.clone());
    }
    let cycles = graph.detect_cycles();
    for cycle in &cycles {
        issues.push(ValidationIssue::error(
            RuleKind::CircularDependency,
            cycle.first().cloned().unwrap_or_default(),
            format!("circular dependency in external batch: {}", cycle.join(" -> ")),
        ));
    }

    let report = Report::new(cycles, issues);
    if report.has_errors() {
        Ok(Err(report))
    } else {
        Ok(Ok(tokens))
    }
}
