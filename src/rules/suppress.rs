//! Suppression list for accepted findings
//!
//! Supports user-defined patterns that mute known, reviewed matches (test
//! fixtures, seeded demo data, documentation examples) so they stop
//! depressing the compliance score on every scan.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

/// A suppression entry
#[derive(Debug, Clone, Deserialize)]
pub struct SuppressEntry {
    /// Regex matched against the finding's location unit (file path, row
    /// id, URL segment)
    pub pattern: String,

    /// Human-readable reason for suppressing
    pub reason: String,

    /// Optional rule restriction (if not set, applies to every rule)
    #[serde(default)]
    pub rule: Option<String>,
}

/// The suppression configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SuppressConfig {
    #[serde(default)]
    pub suppress: Vec<SuppressEntry>,
}

/// Compiled suppression list for efficient matching
pub struct SuppressList {
    entries: Vec<(Regex, Option<String>, String)>,
}

impl SuppressList {
    /// Create an empty list
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load and compile a suppression list from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SuppressConfig =
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        Self::from_config(&config)
    }

    /// Compile from config
    pub fn from_config(config: &SuppressConfig) -> Result<Self> {
        let mut entries = Vec::with_capacity(config.suppress.len());

        for entry in &config.suppress {
            let regex = Regex::new(&entry.pattern).map_err(|e| Error::Config(e.to_string()))?;
            entries.push((regex, entry.rule.clone(), entry.reason.clone()));
        }

        Ok(Self { entries })
    }

    /// Check whether a finding at `unit` produced by `rule_id` is
    /// suppressed; returns the reason if so.
    pub fn matches(&self, rule_id: &str, unit: &str) -> Option<&str> {
        for (regex, rule, reason) in &self.entries {
            if let Some(required) = rule {
                if required != rule_id {
                    continue;
                }
            }
            if regex.is_match(unit) {
                return Some(reason);
            }
        }
        None
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
