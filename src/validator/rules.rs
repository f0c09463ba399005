//! The six tier rules
//!
//! All rules always run; the report carries everything found. Zero errors is
//! success regardless of warning count.

use crate::graph::TokenGraph;
use crate::models::{ReferencePolicy, Report, RuleKind, Tier, Token, ValidationIssue};
use crate::parser::PrimitiveUsage;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the rule engine consumes for one run
pub struct RuleInput<'a> {
    pub tokens: &'a BTreeMap<String, Token>,
    pub graph: &'a TokenGraph,
    /// Names referenced via `var()` inside non-root rules
    pub rule_references: &'a BTreeSet<String>,
    /// Direct primitive references inside non-root rules
    pub primitive_usages: &'a [PrimitiveUsage],
    /// Duplicate definitions ignored by first-definition-wins
    pub duplicates: &'a [(String, usize)],
}

/// Run all rules and assemble the report
pub fn run(input: &RuleInput) -> Report {
    let cycles = input.graph.detect_cycles();

    let mut issues = Vec::new();
    issues.extend(missing_references(input));
    issues.extend(circular_dependencies(&cycles));
    issues.extend(tier_violations(input));
    issues.extend(orphan_tokens(input));
    issues.extend(unused_semantics(input));
    issues.extend(direct_primitive_usages(input));
    issues.extend(duplicate_definitions(input));

    Report::new(cycles, issues)
}

/// Every referenced name must be defined, whether the reference comes
/// from a token value or from a rule.
fn missing_references(input: &RuleInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for token in input.tokens.values() {
        for reference in &token.references {
            if !input.tokens.contains_key(reference) {
                issues.push(ValidationIssue::error(
                    RuleKind::MissingReference,
                    &token.name,
                    format!(
                        "token '{}' references undefined token '{}'",
                        token.name, reference
                    ),
                ));
            }
        }
    }

    for reference in input.rule_references {
        if !input.tokens.contains_key(reference) {
            issues.push(ValidationIssue::error(
                RuleKind::MissingReference,
                reference,
                format!("a rule references undefined token '{}'", reference),
            ));
        }
    }

    issues
}

/// Every detected cycle is an error listing the full path
fn circular_dependencies(cycles: &[Vec<String>]) -> Vec<ValidationIssue> {
    cycles
        .iter()
        .map(|cycle| {
            let subject = cycle.first().cloned().unwrap_or_default();
            ValidationIssue::error(
                RuleKind::CircularDependency,
                subject,
                format!("circular dependency: {}", cycle.join(" -> ")),
            )
        })
        .collect()
}

/// References must respect the local adjacency table. Target tier comes
/// from the referenced name, so even references to undefined tokens are
/// checked (a primitive holding any reference is always an error).
fn tier_violations(input: &RuleInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for token in input.tokens.values() {
        for reference in &token.references {
            let target = Tier::from_name(reference);
            if !token.tier.may_reference(target, ReferencePolicy::Local) {
                let message = if token.tier == Tier::Primitive {
                    format!(
                        "primitive token '{}' must hold a literal value but references '{}'",
                        token.name, reference
                    )
                } else {
                    format!(
                        "{} token '{}' may reference {} but references {} token '{}'",
                        token.tier,
                        token.name,
                        token.tier.allowed_description(ReferencePolicy::Local),
                        target,
                        reference
                    )
                };
                issues.push(ValidationIssue::error(
                    RuleKind::TierViolation,
                    &token.name,
                    message,
                ));
            }
        }
    }

    issues
}

/// A token referenced by nothing and used in no rule is a warning, not
/// an error — some tokens are an intentional public contract.
fn orphan_tokens(input: &RuleInput) -> Vec<ValidationIssue> {
    input
        .tokens
        .values()
        .filter(|token| {
            !input.graph.is_referenced(&token.name)
                && !input.rule_references.contains(&token.name)
        })
        .map(|token| {
            ValidationIssue::warning(
                RuleKind::OrphanToken,
                &token.name,
                format!(
                    "token '{}' is defined but never referenced or used in a rule",
                    token.name
                ),
            )
        })
        .collect()
}

/// A semantic token no component consumes and no rule uses
fn unused_semantics(input: &RuleInput) -> Vec<ValidationIssue> {
    input
        .tokens
        .values()
        .filter(|token| token.tier == Tier::Semantic)
        .filter(|token| {
            let consumed_by_component = input
                .graph
                .referenced_by(&token.name)
                .iter()
                .any(|consumer| Tier::from_name(consumer) == Tier::Component);
            !consumed_by_component && !input.rule_references.contains(&token.name)
        })
        .map(|token| {
            ValidationIssue::warning(
                RuleKind::UnusedSemantic,
                &token.name,
                format!(
                    "semantic token '{}' is consumed by no component token and used in no rule",
                    token.name
                ),
            )
        })
        .collect()
}

/// Style rules must consume component-tier names only
fn direct_primitive_usages(input: &RuleInput) -> Vec<ValidationIssue> {
    input
        .primitive_usages
        .iter()
        .map(|usage| {
            ValidationIssue::error(
                RuleKind::DirectPrimitiveUsage,
                &usage.name,
                format!(
                    "rule '{}' (line {}) references primitive '{}' directly; rules must consume component tokens",
                    usage.selector, usage.line, usage.name
                ),
            )
        })
        .collect()
}

/// First definition wins is deliberate policy; keep it visible
fn duplicate_definitions(input: &RuleInput) -> Vec<ValidationIssue> {
    input
        .duplicates
        .iter()
        .map(|(name, line)| {
            ValidationIssue::warning(
                RuleKind::DuplicateDefinition,
                name,
                format!(
                    "duplicate definition of '{}' at line {} ignored; the first definition wins",
                    name, line
                ),
            )
        })
        .collect()
}
