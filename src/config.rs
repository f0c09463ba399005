//! Per-run configuration
//!
//! Settings come from an optional `tokend.toml` at the project root, layered
//! over built-in defaults, with CLI flags applied on top by the command
//! handlers. The resolved state lives in one [`RunContext`] passed explicitly
//! into every component; there are no process-wide singletons.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Ordered candidate locations of the compiled stylesheet
const DEFAULT_STYLESHEET_CANDIDATES: &[&str] = &[
    "dist/tokens.css",
    "dist/styles.css",
    "build/styles.css",
    "public/styles.css",
];

const DEFAULT_REGISTRY_PATH: &str = "tokens/user-registry.json";
const DEFAULT_OUT_DIR: &str = "tokens";
const CONFIG_FILE: &str = "tokend.toml";

/// Shape of `tokend.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub stylesheet_candidates: Option<Vec<PathBuf>>,
    pub registry_path: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub default_scope: Option<String>,
}

/// Resolved configuration for a single run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub stylesheet_candidates: Vec<PathBuf>,
    pub registry_path: PathBuf,
    pub out_dir: PathBuf,
    pub default_scope: Option<String>,
}

impl RunContext {
    /// Resolve configuration for the project rooted at `root`
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config_path = root.join(CONFIG_FILE);

        let file_config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read '{}'", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse '{}'", config_path.display()))?
        } else {
            FileConfig::default()
        };

        let stylesheet_candidates = file_config.stylesheet_candidates.unwrap_or_else(|| {
            DEFAULT_STYLESHEET_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .collect()
        });

        Ok(Self {
            stylesheet_candidates,
            registry_path: root.join(
                file_config
                    .registry_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_PATH)),
            ),
            out_dir: root.join(
                file_config
                    .out_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            ),
            default_scope: file_config.default_scope,
            root,
        })
    }

    /// First existing stylesheet candidate, if any.
    /// Total absence is a soft skip for the caller, not a failure.
    pub fn locate_stylesheet(&self) -> Option<PathBuf> {
        self.stylesheet_candidates
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.exists())
    }

    /// Resolve a possibly relative path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
