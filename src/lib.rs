//! dataguardian - PII detection and GDPR/UAVG compliance scanning engine
//!
//! This library scans source trees, database exports, websites, images,
//! and cloud resource metadata for personally identifiable information and
//! computes a deterministic compliance score.
//!
//! # Features
//!
//! - **Pattern library**: regex rules with checksum validation (BSN
//!   elfproef, IBAN mod-97, Luhn) compiled once and shared across workers
//! - **Scanner adapters**: one per source kind, dispatched over a tagged
//!   request type
//! - **Risk scoring**: severity-weighted 0-100 score with a Critical
//!   override bucket
//! - **Suppression support**: user-defined exceptions for reviewed matches
//! - **Audit logging**: JSONL log of all scan invocations
//!
//! # Example
//!
//! ```no_run
//! use dataguardian::{Config, ScanEngine, ScanRequest};
//!
//! let config = Config::default();
//! let engine = ScanEngine::new(config).unwrap();
//!
//! let request = ScanRequest::from_json(
//!     r#"{"source":{"type":"code","path":"/srv/app"}}"#,
//! ).unwrap();
//!
//! let result = engine.scan(&request);
//! println!("{}", result.to_json());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod scoring;

// Re-exports for convenience
pub use config::Config;
pub use engine::PatternLibrary;
pub use error::{Error, Result};
pub use input::{ScanRequest, ScanSource};
pub use output::{Finding, ScanResult};
pub use rules::{Category, Jurisdiction, Severity};
pub use scanner::ScanEngine;
pub use scoring::RiskLevel;
