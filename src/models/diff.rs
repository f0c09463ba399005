use serde::{Deserialize, Serialize};

/// Classification of one external token against the local set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffCategory {
    /// Absent locally
    New,
    /// Present locally with different value text
    Modified,
    /// Present locally, absent externally; informational, never auto-deleted
    Removed,
    /// Present locally with identical value text
    Unchanged,
}

impl DiffCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DiffCategory::New => "NEW",
            DiffCategory::Modified => "MODIFIED",
            DiffCategory::Removed => "REMOVED",
            DiffCategory::Unchanged => "UNCHANGED",
        }
    }
}

impl std::fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified entry of a diff between external and local token sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub category: DiffCategory,
    /// Internal token name
    pub name: String,
    /// Local value, if the token exists locally
    pub old_value: Option<String>,
    /// Proposed value, if the token exists externally
    pub new_value: Option<String>,
}
