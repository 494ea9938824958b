//! Database export scanner
//!
//! Scans exported row data (CSV/TSV dumps or JSON-lines). Exhaustive
//! scanning of a large table costs more than it finds, so past a head of
//! rows the adapter samples deterministically: every n-th row. The same
//! export always yields the same findings.

use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::DatabaseConfig;
use crate::engine::PatternLibrary;
use crate::output::Diagnostic;
use crate::scanner::{cloud, Deadline, ScanOutcome};

/// Scan a table export file.
pub fn scan_export(
    path: &Path,
    library: &PatternLibrary,
    config: &DatabaseConfig,
    deadline: Deadline,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let name = path.display().to_string();

    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return ScanOutcome::failed(name, format!("open error: {}", e));
        }
    };

    let json_rows = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    let reader = BufReader::new(file);
    for (idx, line) in reader.lines().enumerate() {
        if deadline.expired() {
            outcome.incomplete = true;
            break;
        }

        if !should_scan_row(idx, config) {
            outcome.units_skipped += 1;
            continue;
        }

        let unit = format!("{}:row {}", name, idx + 1);
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                outcome.diagnostics.push(Diagnostic {
                    unit,
                    message: format!("read error: {}", e),
                });
                continue;
            }
        };

        if json_rows {
            match serde_json::from_str::<serde_json::Value>(&line) {
                Ok(value) => {
                    let mut fields = Vec::new();
                    cloud::collect_strings(&value, "$".to_string(), &mut fields);
                    for (json_path, text) in fields {
                        let field_unit = format!("{} {}", unit, json_path);
                        outcome
                            .findings
                            .extend(library.match_text(&text, &field_unit));
                    }
                }
                // Malformed row: fall back to matching the raw line
                Err(_) => outcome.findings.extend(library.match_text(&line, &unit)),
            }
        } else {
            outcome.findings.extend(library.match_text(&line, &unit));
        }

        outcome.units_scanned += 1;
    }

    debug!(
        scanned = outcome.units_scanned,
        sampled_out = outcome.units_skipped,
        "export scan complete"
    );
    outcome
}

/// Deterministic sampling policy: the head of the export is scanned in
/// full, every `sample_stride`-th row after that. `sample_rows = 0`
/// disables sampling entirely.
fn should_scan_row(idx: usize, config: &DatabaseConfig) -> bool {
    if config.sample_rows == 0 || idx < config.sample_rows {
        return true;
    }
    if config.sample_stride == 0 {
        return false;
    }
    (idx - config.sample_rows) % config.sample_stride == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Category, Jurisdiction};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn library() -> PatternLibrary {
        PatternLibrary::compile(Jurisdiction::Netherlands, 0.5).unwrap()
    }

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            sample_rows: 1000,
            sample_stride: 17,
        }
    }

    fn far_deadline() -> Deadline {
        Deadline::after(Duration::from_secs(300))
    }

    #[test]
    fn test_scan_csv_rows() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("users.csv");
        fs::write(
            &file,
            "id,email,iban\n1,jan@example.nl,NL91ABNA0417164300\n2,piet@example.nl,\n",
        )
        .unwrap();

        let lib = library();
        let outcome = scan_export(&file, &lib, &config(), far_deadline());

        assert_eq!(outcome.units_scanned, 3);
        assert_eq!(outcome.findings.len(), 3);
        assert!(outcome
            .findings
            .iter()
            .any(|f| f.category == Category::Iban));

        // Row numbers are 1-based
        assert!(outcome.findings[0].location.unit.ends_with("row 2"));
    }

    #[test]
    fn test_scan_jsonl_rows() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("users.jsonl");
        fs::write(
            &file,
            "{\"name\":\"Jan\",\"contact\":{\"email\":\"jan@example.nl\"}}\n",
        )
        .unwrap();

        let lib = library();
        let outcome = scan_export(&file, &lib, &config(), far_deadline());

        assert_eq!(outcome.findings.len(), 1);
        assert!(outcome.findings[0].location.unit.contains("$.contact.email"));
    }

    #[test]
    fn test_sampling_policy() {
        let config = DatabaseConfig {
            sample_rows: 10,
            sample_stride: 5,
        };

        // Head rows always scanned
        assert!(should_scan_row(0, &config));
        assert!(should_scan_row(9, &config));

        // Past the head: every 5th
        assert!(should_scan_row(10, &config));
        assert!(!should_scan_row(11, &config));
        assert!(!should_scan_row(14, &config));
        assert!(should_scan_row(15, &config));
    }

    #[test]
    fn test_sampling_disabled() {
        let config = DatabaseConfig {
            sample_rows: 0,
            sample_stride: 17,
        };
        assert!(should_scan_row(123_456, &config));
    }

    #[test]
    fn test_sampled_export_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("big.csv");
        let mut body = String::new();
        for i in 0..200 {
            body.push_str(&format!("{},user{}@example.nl\n", i, i));
        }
        fs::write(&file, &body).unwrap();

        let config = DatabaseConfig {
            sample_rows: 50,
            sample_stride: 10,
        };
        let lib = library();
        let a = scan_export(&file, &lib, &config, far_deadline());
        let b = scan_export(&file, &lib, &config, far_deadline());

        // 50 head rows + rows 50, 60, ... 190
        assert_eq!(a.units_scanned, 65);
        assert_eq!(a.units_scanned, b.units_scanned);
        assert_eq!(a.findings.len(), b.findings.len());
    }

    #[test]
    fn test_missing_export_is_diagnostic() {
        let lib = library();
        let outcome = scan_export(
            Path::new("/no/such/export.csv"),
            &lib,
            &config(),
            far_deadline(),
        );
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_deadline_stops_rows() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("t.csv");
        fs::write(&file, "a@example.nl\nb@example.nl\n").unwrap();

        let lib = library();
        let outcome = scan_export(&file, &lib, &config(), Deadline::after(Duration::ZERO));

        assert!(outcome.incomplete);
        assert!(outcome.findings.is_empty());
    }
}
