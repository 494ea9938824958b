//! Image scanner
//!
//! Full OCR lives outside this crate. What the adapter extracts itself is
//! embedded text: EXIF fields, PNG text chunks, and OCR sidecar output all
//! surface as printable runs in the raw bytes. Pixel data yields no runs
//! and therefore no findings.

use std::path::Path;

use crate::engine::PatternLibrary;
use crate::scanner::{Deadline, ScanOutcome};

/// Minimum printable run length worth scanning.
const MIN_RUN_LEN: usize = 6;

/// Scan an image file for embedded text.
pub fn scan_image(path: &Path, library: &PatternLibrary, deadline: Deadline) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let unit = path.display().to_string();

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            return ScanOutcome::failed(unit, format!("read error: {}", e));
        }
    };

    for (run_offset, text) in printable_runs(&bytes, MIN_RUN_LEN) {
        if deadline.expired() {
            outcome.incomplete = true;
            return outcome;
        }

        let mut findings = library.match_text(&text, &unit);
        for f in &mut findings {
            // Report positions in the image file, not within the run
            f.location.offset += run_offset;
        }
        outcome.findings.extend(findings);
    }

    outcome.units_scanned = 1;
    outcome
}

/// Extract runs of printable ASCII (plus tab) of at least `min_len` bytes.
fn printable_runs(bytes: &[u8], min_len: usize) -> Vec<(usize, String)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, &b) in bytes.iter().enumerate() {
        let printable = (0x20..=0x7e).contains(&b) || b == b'\t';
        match (printable, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    runs.push((s, String::from_utf8_lossy(&bytes[s..i]).into_owned()));
                }
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        if bytes.len() - s >= min_len {
            runs.push((s, String::from_utf8_lossy(&bytes[s..]).into_owned()));
        }
    }

    runs
}
