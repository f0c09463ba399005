use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the run, no partial success
    Error,
    /// Reported but non-blocking
    Warning,
}

impl Severity {
    /// Get display symbol for severity
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
        }
    }

    /// Get display name for severity
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

/// Which rule produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    MissingReference,
    CircularDependency,
    TierViolation,
    DirectPrimitiveUsage,
    OrphanToken,
    UnusedSemantic,
    DuplicateDefinition,
}

impl RuleKind {
    /// Kebab-case name used in report output
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::MissingReference => "missing-reference",
            RuleKind::CircularDependency => "circular-dependency",
            RuleKind::TierViolation => "tier-violation",
            RuleKind::DirectPrimitiveUsage => "direct-primitive-usage",
            RuleKind::OrphanToken => "orphan-token",
            RuleKind::UnusedSemantic => "unused-semantic",
            RuleKind::DuplicateDefinition => "duplicate-definition",
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: RuleKind,
    /// Token (or rule selector) the issue is about
    pub subject: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(kind: RuleKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn warning(kind: RuleKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Plain one-line rendering (no color)
    pub fn format(&self) -> String {
        format!(
            "{} [{}] {}: {}",
            self.severity.symbol(),
            self.kind.name(),
            self.subject,
            self.message
        )
    }
}

/// Full validation report with deterministic ordering: cycle status first,
/// then errors, then warnings, then summary.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Detected cycles as ordered name lists, closing name repeated
    pub cycles: Vec<Vec<String>>,
    /// All issues, errors sorted before warnings
    pub issues: Vec<ValidationIssue>,
}

impl Report {
    /// Build a report, normalizing issue order
    pub fn new(cycles: Vec<Vec<String>>, mut issues: Vec<ValidationIssue>) -> Self {
        issues.sort_by(|a, b| {
            (a.severity, a.kind, &a.subject, &a.message)
                .cmp(&(b.severity, b.kind, &b.subject, &b.message))
        });
        Self { cycles, issues }
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Render the report for the terminal
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.cycles.is_empty() {
            out.push_str(&format!("{}\n", "✓ dependency graph is acyclic".green()));
        } else {
            out.push_str(&format!(
                "{}\n",
                format!("✗ {} circular dependency chain(s) detected", self.cycles.len()).red()
            ));
        }

        for issue in self.errors() {
            out.push_str(&format!("{}\n", issue.format().red()));
        }
        for issue in self.warnings() {
            out.push_str(&format!("{}\n", issue.format().yellow()));
        }

        let summary = format!(
            "{} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );
        if self.has_errors() {
            out.push_str(&format!("{}\n", summary.red().bold()));
        } else {
            out.push_str(&format!("{}\n", summary.green()));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_orders_errors_before_warnings() {
        let report = Report::new(
            vec![],
            vec![
                ValidationIssue::warning(RuleKind::OrphanToken, "--b", "orphan"),
                ValidationIssue::error(RuleKind::MissingReference, "--a", "missing"),
            ],
        );

        assert_eq!(report.issues[0].severity, Severity::Error);
        assert_eq!(report.issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_report_ordering_is_deterministic() {
        let make = || {
            Report::new(
                vec![],
                vec![
                    ValidationIssue::error(RuleKind::TierViolation, "--z", "z"),
                    ValidationIssue::error(RuleKind::TierViolation, "--a", "a"),
                    ValidationIssue::error(RuleKind::MissingReference, "--m", "m"),
                ],
            )
        };
        let a = make();
        let b = make();
        let keys: Vec<_> = a.issues.iter().map(|i| i.subject.clone()).collect();
        assert_eq!(keys, vec!["--m", "--a", "--z"]);
        assert_eq!(
            keys,
            b.issues.iter().map(|i| i.subject.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_exit_rule_warnings_do_not_block() {
        let report = Report::new(
            vec![],
            vec![ValidationIssue::warning(
                RuleKind::UnusedSemantic,
                "--semantic-x",
                "unused",
            )],
        );
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_render_cycle_status_comes_first() {
        let report = Report::new(
            vec![vec!["--a".into(), "--b".into(), "--a".into()]],
            vec![ValidationIssue::error(
                RuleKind::CircularDependency,
                "--a",
                "cycle",
            )],
        );
        let rendered = report.render();
        let first_line = rendered.lines().next().unwrap();
        assert!(first_line.contains("circular dependency chain"));
    }
}
