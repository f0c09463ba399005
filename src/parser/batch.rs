//! External batch file reading
//!
//! The export file is read strictly: unparsable JSON, a missing `tokens`
//! field, or an entry without a name/value fails the whole read. Nothing is
//! partially ingested.

use crate::models::ExternalBatch;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Read and structurally validate an external token batch
pub fn load(path: &Path) -> Result<ExternalBatch> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token batch '{}'", path.display()))?;
    parse(&content).with_context(|| format!("Malformed token batch '{}'", path.display()))
}

/// Parse batch text and reject structurally invalid entries
pub fn parse(content: &str) -> Result<ExternalBatch> {
    let batch: ExternalBatch =
        serde_json::from_str(content).context("Failed to parse batch JSON")?;

    for (idx, token) in batch.tokens.iter().enumerate() {
        if token.name.trim().is_empty() {
            bail!("Entry {} has an empty token name", idx + 1);
        }
        if token.name.split('.').any(|segment| segment.is_empty()) {
            bail!(
                "Entry {} has a malformed dotted name: '{}'",
                idx + 1,
                token.name
            );
        }
    }

    Ok(batch)
}
