//! Output artifact computation and writing
//!
//! Every artifact is fully computed in memory from the merged registry, then
//! written. Each file write is individually atomic (temp-then-rename in the
//! target directory), but the set is not transactional: a failed write halts
//! the remaining writes and leaves earlier artifacts in place.

use super::UserRegistry;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One fully computed output file
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Compute all output artifacts for the merged registry.
///
/// `scope` of `None` emits globally scoped fragments (`:root`); a named scope
/// emits `[data-theme="<scope>"]`. The snapshot is planned last so a partial
/// failure cannot leave a snapshot that claims more than was written.
pub fn plan(registry: &UserRegistry, scope: Option<&str>, out_dir: &Path) -> Result<Vec<Artifact>> {
    let snapshot = serde_json::to_string_pretty(registry)
        .context("Failed to serialize registry snapshot")?;

    Ok(vec![
        Artifact {
            path: out_dir.join("user-overrides.css"),
            contents: css_fragment(registry, scope),
        },
        Artifact {
            path: out_dir.join("_user-overrides.scss"),
            contents: source_fragment(registry, scope),
        },
        Artifact {
            path: out_dir.join("user-registry.snapshot.json"),
            contents: snapshot,
        },
    ])
}

/// Override stylesheet fragment for direct consumption by the browser
pub fn css_fragment(registry: &UserRegistry, scope: Option<&str>) -> String {
    let mut out = String::from("/* Generated by tokend from the user override registry. Do not edit by hand. */\n");
    out.push_str(&format!("{} {{\n", selector(scope)));
    for (name, value) in &registry.overrides {
        out.push_str(&format!("  {}: {};\n", name, value));
    }
    out.push_str("}\n");
    out
}

/// Equivalent buildable source fragment for the upstream token compiler
pub fn source_fragment(registry: &UserRegistry, scope: Option<&str>) -> String {
    let mut out = String::from("// Generated by tokend. Import into the token build entrypoint.\n");
    out.push_str(&format!("{} {{\n", selector(scope)));
    for (name, value) in &registry.overrides {
        out.push_str(&format!("  {}: {};\n", name, value));
    }
    out.push_str("}\n");
    out
}

fn selector(scope: Option<&str>) -> String {
    match scope {
        Some(name) => format!("[data-theme=\"{}\"]", name),
        None => ":root".to_string(),
    }
}

/// Write all artifacts in order; stop at the first failure.
/// Returns the paths written so far alongside any error via context.
pub fn write_all(artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        write_atomic(&artifact.path, &artifact.contents)
            .with_context(|| format!("Failed to write '{}'", artifact.path.display()))?;
        written.push(artifact.path.clone());
    }
    Ok(written)
}

/// Write a file via a temp file in the same directory plus rename
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    use std::io::Write;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path)?;
    Ok(())
}
