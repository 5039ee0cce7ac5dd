//! Configuration file loading for stdcheck.
//!
//! Reads `.stdcheck.json` from the project root and provides typed access to
//! all settings. Falls back to defaults when the file is missing or incomplete.
//! The ignore file itself (`.standardignore`) is parsed by the enforcement
//! crate; this file only says where to find it.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".stdcheck.json";
pub const DEFAULT_IGNORE_FILE: &str = ".standardignore";

/// Top-level stdcheck configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdcheckConfig {
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
    /// Worker threads for file analysis; 0 means one per available core.
    #[serde(default)]
    pub jobs: usize,
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Rule toggles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule ids (e.g. `"R9"`) that are not evaluated.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Exempt `__dunder__` names from the name-mangling rule.
    #[serde(default)]
    pub allow_dunder_names: bool,
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

impl Default for StdcheckConfig {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            jobs: 0,
            rules: RulesConfig::default(),
        }
    }
}

impl StdcheckConfig {
    /// Load configuration from `.stdcheck.json` inside the given project root.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
