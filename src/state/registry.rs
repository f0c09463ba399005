//! User registry persistence
//!
//! The registry is the persisted record of externally approved value changes
//! layered atop the base token set. It is loaded at apply start, mutated only
//! by approved diff entries, and written back as a whole.

use crate::models::{DiffCategory, DiffEntry};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// What a changelog entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Update,
    Remove,
}

/// One append-only changelog record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub action: ChangeAction,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub at: DateTime<Utc>,
}

/// Persisted override registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRegistry {
    /// name -> approved override value
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    /// Names whose overrides were explicitly reverted
    #[serde(default)]
    pub removed: BTreeSet<String>,
    /// Append-only history of approved changes
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

/// Load-or-default handle on the registry file
pub struct RegistryStore {
    path: PathBuf,
    registry: UserRegistry,
    dirty: bool,
}

impl RegistryStore {
    /// Load the registry, or start from an empty one if the file is absent
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let registry = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read registry '{}'", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse registry '{}'", path.display()))?
        } else {
            UserRegistry::default()
        };

        Ok(Self {
            path,
            registry,
            dirty: false,
        })
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Merge approved diff entries into the registry.
    ///
    /// NEW/MODIFIED upsert the override map with a changelog entry carrying
    /// the previous value; REMOVED deletes the override and records the name
    /// in the removed set. Returns the number of merged entries.
    pub fn apply(&mut self, accepted: &[DiffEntry]) -> usize {
        let mut merged = 0;

        for entry in accepted {
            match entry.category {
                DiffCategory::New | DiffCategory::Modified => {
                    let value = match &entry.new_value {
                        Some(v) => v.clone(),
                        None => continue,
                    };
                    let previous = self.registry.overrides.insert(entry.name.clone(), value.clone());
                    // re-approving a token clears an earlier removal
                    self.registry.removed.remove(&entry.name);
                    let action = if previous.is_some() {
                        ChangeAction::Update
                    } else {
                        ChangeAction::Add
                    };
                    self.registry.changelog.push(ChangelogEntry {
                        action,
                        token: entry.name.clone(),
                        value: Some(value),
                        previous,
                        at: Utc::now(),
                    });
                    merged += 1;
                }
                DiffCategory::Removed => {
                    let previous = self.registry.overrides.remove(&entry.name);
                    if previous.is_none() {
                        continue;
                    }
                    self.registry.removed.insert(entry.name.clone());
                    self.registry.changelog.push(ChangelogEntry {
                        action: ChangeAction::Remove,
                        token: entry.name.clone(),
                        value: None,
                        previous,
                        at: Utc::now(),
                    });
                    merged += 1;
                }
                DiffCategory::Unchanged => {}
            }
        }

        if merged > 0 {
            self.dirty = true;
        }
        merged
    }

    /// Write the registry back as a whole (atomic temp-then-rename)
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.registry)
            .context("Failed to serialize registry")?;
        super::artifacts::write_atomic(&self.path, &content)
            .with_context(|| format!("Failed to write registry '{}'", self.path.display()))?;
        self.dirty = false;
        Ok(())
    }

    pub fn save_if_dirty(&mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }
}
