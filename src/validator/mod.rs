//! Tier rule engine
//!
//! Consumes the extractor output plus the dependency graph and produces a
//! [`Report`]. Validation is read-only; nothing here touches the filesystem.

pub mod rules;

pub use rules::{run, RuleInput};

use crate::graph::TokenGraph;
use crate::models::Report;
use crate::parser::Extraction;

/// Validate one extraction end to end: build the graph, run the six rules
pub fn validate(extraction: &Extraction) -> Report {
    let graph = TokenGraph::from_tokens(extraction.definitions.values());
    let input = RuleInput {
        tokens: &extraction.definitions,
        graph: &graph,
        rule_references: &extraction.rule_references,
        primitive_usages: &extraction.primitive_usages,
        duplicates: &extraction.duplicates,
    };
    rules::run(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleKind, Severity};
    use crate::parser;

    fn validate_css(css: &str) -> Report {
        let extraction = parser::extract(css).unwrap();
        validate(&extraction)
    }

    #[test]
    fn test_clean_token_set_passes() {
        let report = validate_css(
            r#"
:root {
  --primitive-color-blue-500: #3b82f6;
  --semantic-color-action: var(--primitive-color-blue-500);
  --component-button-bg: var(--semantic-color-action);
}
.button {
  background: var(--component-button-bg);
}
"#,
        );

        assert!(report.cycles.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_missing_reference_names_the_undefined_primitive() {
        // semantic token referencing an undefined primitive: exactly one
        // missing-reference error naming that primitive
        let report = validate_css(
            r#"
:root {
  --semantic-color-action: var(--primitive-color-blue-500);
}
.button {
  background: var(--semantic-color-action);
}
"#,
        );

        let missing: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == RuleKind::MissingReference)
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].message.contains("--primitive-color-blue-500"));
        assert_eq!(missing[0].severity, Severity::Error);
    }

    #[test]
    fn test_cycle_is_an_error_listing_the_path() {
        let report = validate_css(
            r#"
:root {
  --semantic-a: var(--semantic-b);
  --semantic-b: var(--semantic-a);
}
"#,
        );

        assert_eq!(report.cycles.len(), 1);
        let cycle_errors: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == RuleKind::CircularDependency)
            .collect();
        assert_eq!(cycle_errors.len(), 1);
        assert!(cycle_errors[0].message.contains("--semantic-a"));
        assert!(cycle_errors[0].message.contains("--semantic-b"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_any_reference_from_a_primitive_is_a_tier_violation() {
        for target in ["--primitive-other", "--semantic-x", "--component-y", "--base-z"] {
            let css = format!(
                ":root {{\n  --primitive-a: var({});\n  {}: #fff;\n}}\n",
                target, target
            );
            let report = validate_css(&css);
            assert!(
                report
                    .issues
                    .iter()
                    .any(|i| i.kind == RuleKind::TierViolation && i.subject == "--primitive-a"),
                "expected tier violation for reference to {}",
                target
            );
        }
    }

    #[test]
    fn test_component_may_reference_base_locally() {
        let report = validate_css(
            r#"
:root {
  --primitive-p: 4px;
  --semantic-s: var(--primitive-p);
  --base-radius: var(--semantic-s);
  --component-card-radius: var(--base-radius);
}
.card {
  border-radius: var(--component-card-radius);
}
"#,
        );

        assert!(
            !report.has_errors(),
            "unexpected errors: {:?}",
            report.issues
        );
    }

    #[test]
    fn test_orphan_token_is_a_warning() {
        let report = validate_css(
            r#"
:root {
  --primitive-unused: #000;
}
"#,
        );

        assert!(!report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == RuleKind::OrphanToken && i.severity == Severity::Warning));
    }

    #[test]
    fn test_unused_semantic_is_a_warning() {
        let report = validate_css(
            r#"
:root {
  --primitive-p: #000;
  --semantic-dangling: var(--primitive-p);
  --base-b: var(--semantic-dangling);
}
"#,
        );

        // consumed by a base token but by no component token and no rule
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == RuleKind::UnusedSemantic
                && i.subject == "--semantic-dangling"));
    }

    #[test]
    fn test_direct_primitive_usage_in_rule_is_an_error() {
        let report = validate_css(
            r#"
:root {
  --primitive-color-red: #f00;
}
.alert {
  color: var(--primitive-color-red);
}
"#,
        );

        let direct: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.kind == RuleKind::DirectPrimitiveUsage)
            .collect();
        assert_eq!(direct.len(), 1);
        assert!(direct[0].message.contains(".alert"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_unknown_tier_references_anything() {
        let report = validate_css(
            r#"
:root {
  --primitive-p: #000;
  --legacy-shim: var(--primitive-p);
}
"#,
        );

        assert!(!report
            .issues
            .iter()
            .any(|i| i.kind == RuleKind::TierViolation));
    }

    #[test]
    fn test_duplicate_definition_reported_as_warning() {
        let report = validate_css(
            r#"
:root {
  --primitive-a: #000;
  --primitive-a: #111;
}
"#,
        );

        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == RuleKind::DuplicateDefinition
                && i.severity == Severity::Warning));
    }
}
