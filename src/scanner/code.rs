//! Code/file tree scanner
//!
//! Walks a directory tree and scans file contents on a bounded worker
//! pool. Binary and oversized files are skipped; unreadable entries become
//! diagnostics.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::engine::PatternLibrary;
use crate::output::Diagnostic;
use crate::scanner::{Deadline, ScanOutcome};

/// Bytes sniffed for a NUL to classify a file as binary.
const BINARY_SNIFF_LEN: usize = 8192;

/// Scan a file or directory tree.
pub fn scan_path(
    root: &Path,
    library: &PatternLibrary,
    config: &ScanConfig,
    deadline: Deadline,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    if !root.exists() {
        return ScanOutcome::failed(root.display().to_string(), "path does not exist");
    }

    let mut files: Vec<PathBuf> = Vec::new();
    if root.is_file() {
        files.push(root.to_path_buf());
    } else {
        // Sorted walk keeps unit ordering stable across runs
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            match entry {
                Ok(e) if e.file_type().is_file() => files.push(e.into_path()),
                Ok(_) => {}
                Err(e) => {
                    let unit = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    outcome.diagnostics.push(Diagnostic {
                        unit,
                        message: format!("walk error: {}", e),
                    });
                }
            }
        }
    }

    // The flag lets workers that start after expiry skip without touching
    // the filesystem again.
    let stopped = AtomicBool::new(false);

    let per_file = |path: &PathBuf| scan_file(path, library, config, deadline, &stopped);

    let units: Vec<ScanOutcome> = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
    {
        Ok(pool) => pool.install(|| files.par_iter().map(per_file).collect()),
        Err(e) => {
            warn!(error = %e, "worker pool unavailable, scanning serially");
            files.iter().map(per_file).collect()
        }
    };

    for unit in units {
        outcome.merge(unit);
    }
    outcome
}

/// Scan a single file.
fn scan_file(
    path: &Path,
    library: &PatternLibrary,
    config: &ScanConfig,
    deadline: Deadline,
    stopped: &AtomicBool,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let unit = path.display().to_string();

    if stopped.load(Ordering::Relaxed) || deadline.expired() {
        stopped.store(true, Ordering::Relaxed);
        outcome.incomplete = true;
        outcome.units_skipped = 1;
        return outcome;
    }

    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > config.max_file_size => {
            outcome.units_skipped = 1;
            return outcome;
        }
        Ok(_) => {}
        Err(e) => {
            outcome.diagnostics.push(Diagnostic {
                unit,
                message: format!("metadata error: {}", e),
            });
            return outcome;
        }
    }

    match std::fs::read(path) {
        Ok(bytes) => {
            if is_binary(&bytes) {
                outcome.units_skipped = 1;
            } else {
                let text = String::from_utf8_lossy(&bytes);
                outcome.findings = library.match_text(&text, &unit);
                outcome.units_scanned = 1;
            }
        }
        Err(e) => {
            outcome.diagnostics.push(Diagnostic {
                unit,
                message: format!("read error: {}", e),
            });
        }
    }

    outcome
}

/// NUL byte in the head of the file means binary.
fn is_binary(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .take(BINARY_SNIFF_LEN)
        .any(|&b| b == 0)
}
