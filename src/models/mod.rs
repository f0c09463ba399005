pub mod diff;
pub mod external;
pub mod issue;
pub mod token;

pub use diff::{DiffCategory, DiffEntry};
pub use external::{ExternalBatch, ExternalToken, RawExternalToken};
pub use issue::{Report, RuleKind, Severity, ValidationIssue};
pub use token::{ReferencePolicy, Tier, Token};
