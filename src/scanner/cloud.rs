//! Cloud resource metadata scanner
//!
//! Scans a JSON document of resource metadata (tags, descriptions,
//! environment blocks) value by value, with the JSON path as location
//! context.

use std::path::Path;

use serde_json::Value;

use crate::engine::PatternLibrary;
use crate::scanner::{Deadline, ScanOutcome};

/// Scan a resource metadata document.
pub fn scan_metadata(path: &Path, library: &PatternLibrary, deadline: Deadline) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let name = path.display().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return ScanOutcome::failed(name, format!("read error: {}", e));
        }
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            return ScanOutcome::failed(name, format!("parse error: {}", e));
        }
    };

    let mut fields = Vec::new();
    collect_strings(&value, "$".to_string(), &mut fields);

    for (json_path, text) in fields {
        if deadline.expired() {
            outcome.incomplete = true;
            break;
        }

        let unit = format!("{}:{}", name, json_path);
        outcome.findings.extend(library.match_text(&text, &unit));
        outcome.units_scanned += 1;
    }

    outcome
}

/// Recursively collect every string value with its JSON path. Key order
/// is stable, so scans of the same document are deterministic.
pub(crate) fn collect_strings(value: &Value, path: String, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(s) => out.push((path, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_strings(item, format!("{}[{}]", path, i), out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                collect_strings(item, format!("{}.{}", path, key), out);
            }
        }
        _ => {}
    }
}
