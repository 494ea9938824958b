//! Integration tests for end-to-end scans

use std::fs;

use dataguardian::{Config, Jurisdiction, RiskLevel, ScanEngine, ScanRequest};
use tempfile::TempDir;

fn engine() -> ScanEngine {
    ScanEngine::new(Config::default()).unwrap()
}

fn code_request(path: &std::path::Path) -> ScanRequest {
    let json = format!(
        r#"{{"source":{{"type":"code","path":"{}"}}}}"#,
        path.display()
    );
    ScanRequest::from_json(&json).unwrap()
}

#[test]
fn test_clean_tree_scores_100() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
    fs::write(dir.path().join("README.md"), "# hello\n").unwrap();

    let result = engine().scan(&code_request(dir.path()));

    assert_eq!(result.score, 100);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.findings.is_empty());
    assert_eq!(result.units_scanned, 2);
    assert!(!result.incomplete);
}

#[test]
fn test_exposed_bsn_is_critical() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("seed.sql"),
        "INSERT INTO users (bsn) VALUES ('123456782');\n",
    )
    .unwrap();

    let result = engine().scan(&code_request(dir.path()));

    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.score, 80);
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert_eq!(result.severity_counts.critical, 1);
}

#[test]
fn test_findings_sorted_and_stable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "jan@example.nl").unwrap();
    fs::write(dir.path().join("b.txt"), "piet@example.nl en kees@example.nl").unwrap();

    let eng = engine();
    let first = eng.scan(&code_request(dir.path()));
    let second = eng.scan(&code_request(dir.path()));

    assert_eq!(first.findings.len(), 3);
    for (a, b) in first.findings.iter().zip(second.findings.iter()) {
        assert_eq!(a.rule_id, b.rule_id);
        assert_eq!(a.location.unit, b.location.unit);
        assert_eq!(a.location.offset, b.location.offset);
    }

    // Sorted by unit, then offset
    let units: Vec<&str> = first
        .findings
        .iter()
        .map(|f| f.location.unit.as_str())
        .collect();
    let mut sorted = units.clone();
    sorted.sort();
    assert_eq!(units, sorted);
}

#[test]
fn test_database_export_scan() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("users.csv");
    fs::write(
        &export,
        "id,email\n1,jan@example.nl\n2,geen-email\n3,piet@example.nl\n",
    )
    .unwrap();

    let json = format!(
        r#"{{"source":{{"type":"database","locator":"{}"}}}}"#,
        export.display()
    );
    let request = ScanRequest::from_json(&json).unwrap();
    let result = engine().scan(&request);

    assert_eq!(result.findings.len(), 2);
    assert!(result.findings[0].location.unit.contains("row 2"));
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_unreadable_source_still_produces_result() {
    let json = r#"{"source":{"type":"cloud","path":"/no/such/resources.json"}}"#;
    let request = ScanRequest::from_json(json).unwrap();
    let result = engine().scan(&request);

    assert_eq!(result.score, 100);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(!result.incomplete);
}

#[test]
fn test_deadline_zero_returns_partial_result() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "jan@example.nl").unwrap();

    let mut config = Config::default();
    config.scan.deadline_secs = 0;
    let eng = ScanEngine::new(config).unwrap();

    let result = eng.scan(&code_request(dir.path()));

    assert!(result.incomplete);
    assert!(result.findings.is_empty());
}

#[test]
fn test_eu_jurisdiction_skips_dutch_rules() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("data.txt"),
        "bsn 123456782 and iban NL91ABNA0417164300\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.general.jurisdiction = Jurisdiction::EuropeanUnion;
    let eng = ScanEngine::new(config).unwrap();

    let result = eng.scan(&code_request(dir.path()));

    // The IBAN is EU-wide; the BSN rule is Dutch only
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].rule_id, "iban");
    assert_eq!(result.jurisdiction, Jurisdiction::EuropeanUnion);
}

#[test]
fn test_result_json_roundtrip_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("x.txt"), "jan@example.nl").unwrap();

    let result = engine().scan(&code_request(dir.path()));
    let json = result.to_json();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["scan_id"].is_string());
    assert_eq!(value["score"], 95);
    assert_eq!(value["risk_level"], "low");
    assert_eq!(value["findings"][0]["category"], "email");
    assert_eq!(value["incomplete"], false);
}
