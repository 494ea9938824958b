//! Scan orchestration
//!
//! Dispatches a request to its source adapter, enforces the scan deadline,
//! applies the suppression list, and aggregates findings into a scored
//! result. Adapters never fail a scan: errors become diagnostics and the
//! partial results gathered so far are kept.

pub mod cloud;
pub mod code;
pub mod database;
pub mod image;
pub mod website;

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::engine::PatternLibrary;
use crate::error::Result;
use crate::input::{ScanRequest, ScanSource};
use crate::output::{Diagnostic, ScanResult, SeverityCounts};
use crate::rules::suppress::SuppressList;
use crate::scoring;

/// Cooperative deadline checked by adapters between scan units.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    /// A deadline `duration` from now.
    pub fn after(duration: Duration) -> Self {
        Self {
            end: Instant::now() + duration,
        }
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }
}

/// Results accumulated by an adapter, possibly partial.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub findings: Vec<crate::output::Finding>,
    pub diagnostics: Vec<Diagnostic>,
    pub units_scanned: usize,
    pub units_skipped: usize,
    pub incomplete: bool,
}

impl ScanOutcome {
    /// An outcome carrying a single diagnostic and nothing else.
    pub fn failed(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            diagnostics: vec![Diagnostic {
                unit: unit.into(),
                message: message.into(),
            }],
            ..Default::default()
        }
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: ScanOutcome) {
        self.findings.extend(other.findings);
        self.diagnostics.extend(other.diagnostics);
        self.units_scanned += other.units_scanned;
        self.units_skipped += other.units_skipped;
        self.incomplete |= other.incomplete;
    }
}

/// The scan engine: compiled pattern library plus configuration, shared
/// read-only across scans.
pub struct ScanEngine {
    config: Config,
    library: PatternLibrary,
    suppress: SuppressList,
}

impl ScanEngine {
    /// Build the engine, compiling the pattern library once.
    pub fn new(config: Config) -> Result<Self> {
        let library = PatternLibrary::compile(
            config.general.jurisdiction,
            config.scan.min_confidence,
        )?;

        let suppress = config
            .suppress_path()
            .and_then(|path| {
                if path.exists() {
                    match SuppressList::from_file(&path) {
                        Ok(list) => Some(list),
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "ignoring suppression list");
                            None
                        }
                    }
                } else {
                    None
                }
            })
            .unwrap_or_else(SuppressList::empty);

        Ok(Self {
            config,
            library,
            suppress,
        })
    }

    /// The compiled pattern library.
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one scan. Always returns a result; failures along the way are
    /// reported as diagnostics on it.
    pub fn scan(&self, request: &ScanRequest) -> ScanResult {
        let started_at = Utc::now();
        let t0 = Instant::now();
        let deadline = Deadline::after(Duration::from_secs(self.config.scan.deadline_secs));

        let mut outcome = match &request.source {
            ScanSource::Code { path } => {
                code::scan_path(path.as_ref(), &self.library, &self.config.scan, deadline)
            }
            ScanSource::Database { locator } => database::scan_export(
                locator.as_ref(),
                &self.library,
                &self.config.database,
                deadline,
            ),
            ScanSource::Website { locator } => {
                website::scan_site(locator, &self.library, &self.config.website, deadline)
            }
            ScanSource::Image { path } => {
                image::scan_image(path.as_ref(), &self.library, deadline)
            }
            ScanSource::Cloud { path } => {
                cloud::scan_metadata(path.as_ref(), &self.library, deadline)
            }
        };

        if !self.suppress.is_empty() {
            let before = outcome.findings.len();
            outcome
                .findings
                .retain(|f| self.suppress.matches(f.rule_id, &f.location.unit).is_none());
            let muted = before - outcome.findings.len();
            if muted > 0 {
                debug!(muted, "findings muted by suppression list");
            }
        }

        // Workers finish in arbitrary order; sort so identical inputs give
        // identical output.
        outcome.findings.sort_by(|a, b| {
            a.location
                .unit
                .cmp(&b.location.unit)
                .then(a.location.offset.cmp(&b.location.offset))
                .then(a.rule_id.cmp(b.rule_id))
        });

        let (score, risk_level) = scoring::score(&outcome.findings);
        let severity_counts = SeverityCounts::tally(&outcome.findings);

        ScanResult {
            scan_id: Uuid::new_v4(),
            started_at,
            source: request.summary(),
            jurisdiction: self.library.jurisdiction(),
            findings: outcome.findings,
            diagnostics: outcome.diagnostics,
            units_scanned: outcome.units_scanned,
            units_skipped: outcome.units_skipped,
            severity_counts,
            score,
            risk_level,
            incomplete: outcome.incomplete,
            duration_ms: t0.elapsed().as_millis() as u64,
        }
    }
}
