//! Configuration loading for dataguardian
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::rules::Jurisdiction;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default jurisdiction for rule selection
    pub jurisdiction: Jurisdiction,

    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            jurisdiction: Jurisdiction::Netherlands,
            audit_log: true,
            audit_path: Some("~/.dataguardian/audit.jsonl".to_string()),
        }
    }
}

/// Scan execution configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker threads for multi-unit sources; 0 means one per core
    pub workers: usize,

    /// Per-scan deadline in seconds; past it the scan returns partial
    /// results flagged incomplete
    pub deadline_secs: u64,

    /// Files larger than this are skipped (bytes)
    pub max_file_size: u64,

    /// Findings below this confidence are dropped
    pub min_confidence: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            deadline_secs: 120,
            max_file_size: 10 * 1024 * 1024,
            min_confidence: 0.5,
        }
    }
}

/// Database adapter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Rows at the head of an export that are always scanned
    pub sample_rows: usize,

    /// Past the head, scan every n-th row; keeps large exports bounded
    /// while staying deterministic
    pub sample_stride: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sample_rows: 1000,
            sample_stride: 17,
        }
    }
}

/// Website adapter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebsiteConfig {
    /// HTTP fetch timeout in seconds
    pub fetch_timeout_secs: u64,

    /// Response bodies are truncated past this size (bytes)
    pub max_body_bytes: u64,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Override configuration section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OverrideConfig {
    /// Path to suppression list file
    pub suppress_file: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scan: ScanConfig,
    pub database: DatabaseConfig,
    pub website: WebsiteConfig,
    pub overrides: OverrideConfig,
}

impl Config {
    /// Load configuration from standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::home_dir().map(|p| p.join(".dataguardian/config.toml")),
            Some(PathBuf::from("/etc/dataguardian/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        self.general
            .audit_path
            .as_ref()
            .map(|p| Self::expand_path(p))
    }

    /// Get the suppression list path (expanded)
    pub fn suppress_path(&self) -> Option<PathBuf> {
        self.overrides
            .suppress_file
            .as_ref()
            .map(|p| Self::expand_path(p))
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
jurisdiction = "netherlands"
audit_log = true
audit_path = "~/.dataguardian/audit.jsonl"

[scan]
workers = 0
deadline_secs = 120
max_file_size = 10485760
min_confidence = 0.5

[database]
sample_rows = 1000
sample_stride = 17

[website]
fetch_timeout_secs = 10
max_body_bytes = 2097152

[overrides]
suppress_file = "~/.dataguardian/suppress.toml"
"#;
