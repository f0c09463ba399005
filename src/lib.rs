// Tokend - design-token governance for compiled stylesheets
// Validates the token dependency graph and reviews external token exports
// into a persisted override registry.

pub mod cli;
pub mod config;
pub mod diff;
pub mod external;
pub mod graph;
pub mod models;
pub mod parser;
pub mod review;
pub mod state;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::RunContext;
pub use models::{DiffCategory, DiffEntry, Report, Severity, Tier, Token, ValidationIssue};
pub use state::{RegistryStore, UserRegistry};
