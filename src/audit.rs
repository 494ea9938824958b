//! JSONL audit logging
//!
//! Records one line per scan invocation for later analysis. Audit failures
//! are warnings, never scan failures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::input::ScanRequest;
use crate::output::ScanResult;
use crate::rules::Jurisdiction;
use crate::scoring::RiskLevel;

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the entry
    pub timestamp: DateTime<Utc>,

    /// Scan this entry belongs to
    pub scan_id: Uuid,

    /// Summary of the scanned source
    pub source: String,

    /// Jurisdiction the scan ran under
    pub jurisdiction: Jurisdiction,

    /// Number of findings
    pub findings: usize,

    /// Compliance score
    pub score: u8,

    /// Risk bucket
    pub risk_level: RiskLevel,

    /// Whether the scan hit its deadline
    pub incomplete: bool,

    /// Scan duration in milliseconds
    pub duration_ms: u64,
}

impl AuditEntry {
    /// Create an audit entry from a request and its result
    pub fn new(request: &ScanRequest, result: &ScanResult) -> Self {
        Self {
            timestamp: Utc::now(),
            scan_id: result.scan_id,
            source: request.summary(),
            jurisdiction: result.jurisdiction,
            findings: result.findings.len(),
            score: result.score,
            risk_level: result.risk_level,
            incomplete: result.incomplete,
            duration_ms: result.duration_ms,
        }
    }
}

/// Audit logger
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            // Ensure parent directory exists
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a completed scan
    pub fn log_scan(
        &mut self,
        request: &ScanRequest,
        result: &ScanResult,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(request, result);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

/// Create a disabled logger (for when audit logging is off)
impl Default for AuditLogger {
    fn default() -> Self {
        Self { writer: None }
    }
}
