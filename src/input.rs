//! Scan request parsing
//!
//! Requests arrive as JSON on stdin. The source is a tagged variant so
//! adapter dispatch is exhaustive: an unknown source type is a parse
//! error, not a runtime surprise.

use serde::Deserialize;

use crate::error::Result;
use crate::rules::Jurisdiction;

/// A scan request
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// What to scan
    pub source: ScanSource,

    /// Jurisdiction override; falls back to the configured default
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
}

/// The source of a scan, tagged by kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScanSource {
    /// A source tree or single file on disk
    Code { path: String },

    /// An exported table: CSV or JSON-lines file
    Database { locator: String },

    /// A URL to fetch, or a saved HTML file
    Website { locator: String },

    /// An image file; embedded text is extracted and scanned
    Image { path: String },

    /// A JSON document of cloud resource metadata
    Cloud { path: String },
}

impl ScanRequest {
    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Short description of the request for logging.
    pub fn summary(&self) -> String {
        match &self.source {
            ScanSource::Code { path } => format!("code:{}", path),
            ScanSource::Database { locator } => format!("database:{}", locator),
            ScanSource::Website { locator } => format!("website:{}", locator),
            ScanSource::Image { path } => format!("image:{}", path),
            ScanSource::Cloud { path } => format!("cloud:{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_request() {
        let json = r#"{"source":{"type":"code","path":"/srv/app"}}"#;
        let request = ScanRequest::from_json(json).unwrap();
        match request.source {
            ScanSource::Code { ref path } => assert_eq!(path, "/srv/app"),
            _ => panic!("Expected code source"),
        }
        assert!(request.jurisdiction.is_none());
    }

    #[test]
    fn test_parse_website_with_jurisdiction() {
        let json =
            r#"{"source":{"type":"website","locator":"https://example.nl"},"jurisdiction":"nl"}"#;
        let request = ScanRequest::from_json(json).unwrap();
        assert_eq!(request.jurisdiction, Some(Jurisdiction::Netherlands));
        match request.source {
            ScanSource::Website { ref locator } => {
                assert_eq!(locator, "https://example.nl")
            }
            _ => panic!("Expected website source"),
        }
    }

    #[test]
    fn test_parse_database_request() {
        let json = r#"{"source":{"type":"database","locator":"export/users.csv"}}"#;
        let request = ScanRequest::from_json(json).unwrap();
        assert!(matches!(request.source, ScanSource::Database { .. }));
    }

    #[test]
    fn test_unknown_source_type_rejected() {
        let json = r#"{"source":{"type":"ftp","locator":"ftp://x"}}"#;
        assert!(ScanRequest::from_json(json).is_err());
    }

    #[test]
    fn test_summary() {
        let json = r#"{"source":{"type":"image","path":"scan.png"}}"#;
        let request = ScanRequest::from_json(json).unwrap();
        assert_eq!(request.summary(), "image:scan.png");
    }
}
