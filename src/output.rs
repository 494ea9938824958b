//! Scan result types and JSON serialization
//!
//! A scan always produces a `ScanResult`, possibly marked incomplete or
//! carrying diagnostics. Downstream report rendering and persistence
//! consume the JSON form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::rules::{Category, Jurisdiction, Severity};
use crate::scoring::RiskLevel;

/// Where in the scanned source a finding sits.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    /// Scan unit: file path, row identifier, URL segment, or JSON path
    pub unit: String,

    /// Byte offset of the match within the unit's extracted text
    pub offset: usize,
}

/// A single detected PII/compliance pattern instance.
///
/// The raw matched value is never stored: findings carry a masked excerpt
/// and a SHA-256 digest instead.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule_id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub legal_basis: &'static str,
    pub location: Location,
    pub excerpt: String,
    pub digest: String,
    pub confidence: f64,
}

/// A non-fatal problem encountered while scanning: unreadable file,
/// unreachable URL, malformed export row. Diagnostics never affect the
/// compliance score.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub unit: String,
    pub message: String,
}

/// Finding counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    /// Tally findings by severity.
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// The aggregate result of one scan invocation. Immutable once built.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub scan_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub source: String,
    pub jurisdiction: Jurisdiction,
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<Diagnostic>,
    pub units_scanned: usize,
    pub units_skipped: usize,
    pub severity_counts: SeverityCounts,
    pub score: u8,
    pub risk_level: RiskLevel,
    /// Set when the scan hit its deadline and returned partial results
    pub incomplete: bool,
    pub duration_ms: u64,
}

impl ScanResult {
    /// Serialize to a single-line JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serialize to human-readable JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
