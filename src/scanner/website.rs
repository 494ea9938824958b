//! Website scanner
//!
//! Fetches a page (or reads saved HTML) and breaks it into segments:
//! external script references, inline script bodies, and visible text.
//! Tracker rules fire on the script segments; the PII rules run over the
//! visible text.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::WebsiteConfig;
use crate::engine::PatternLibrary;
use crate::scanner::{Deadline, ScanOutcome};

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").unwrap());

static SCRIPT_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<script\b[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).unwrap());

static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Scan a website by URL or saved HTML file.
pub fn scan_site(
    locator: &str,
    library: &PatternLibrary,
    config: &WebsiteConfig,
    deadline: Deadline,
) -> ScanOutcome {
    let html = if locator.starts_with("http://") || locator.starts_with("https://") {
        fetch(locator, config)
    } else {
        std::fs::read_to_string(Path::new(locator)).map_err(|e| format!("read error: {}", e))
    };

    let html = match html {
        Ok(h) => h,
        Err(message) => return ScanOutcome::failed(locator, message),
    };

    scan_html(&html, locator, library, deadline)
}

/// Scan already-fetched HTML content.
pub fn scan_html(
    html: &str,
    locator: &str,
    library: &PatternLibrary,
    deadline: Deadline,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    // External script references
    for (i, cap) in SCRIPT_SRC_RE.captures_iter(html).enumerate() {
        if deadline.expired() {
            outcome.incomplete = true;
            return outcome;
        }
        if let Some(src) = cap.get(1) {
            let unit = format!("{}#script-src[{}]", locator, i);
            outcome
                .findings
                .extend(library.match_text(src.as_str(), &unit));
            outcome.units_scanned += 1;
        }
    }

    // Inline script bodies
    for (i, cap) in SCRIPT_RE.captures_iter(html).enumerate() {
        if deadline.expired() {
            outcome.incomplete = true;
            return outcome;
        }
        if let Some(body) = cap.get(1) {
            if body.as_str().trim().is_empty() {
                continue;
            }
            let unit = format!("{}#script[{}]", locator, i);
            outcome
                .findings
                .extend(library.match_text(body.as_str(), &unit));
            outcome.units_scanned += 1;
        }
    }

    // Visible text: strip scripts and styles first, then tags
    if deadline.expired() {
        outcome.incomplete = true;
        return outcome;
    }
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let text = TAG_RE.replace_all(&without_styles, " ");
    let unit = format!("{}#text", locator);
    outcome.findings.extend(library.match_text(&text, &unit));
    outcome.units_scanned += 1;

    debug!(
        segments = outcome.units_scanned,
        findings = outcome.findings.len(),
        "page scan complete"
    );
    outcome
}

/// Fetch a URL with a bounded timeout and body size.
fn fetch(url: &str, config: &WebsiteConfig) -> Result<String, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .map_err(|e| format!("client error: {}", e))?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| format!("fetch error: {}", e))?;

    let mut body = Vec::new();
    response
        .take(config.max_body_bytes)
        .read_to_end(&mut body)
        .map_err(|e| format!("body error: {}", e))?;

    Ok(String::from_utf8_lossy(&body).into_owned())
}
