//! Detection rules for the scanning engine
//!
//! Defines the PII pattern tables, their jurisdictions, and checksum
//! validators. Rules are static data compiled once at startup.

pub mod checksum;
pub mod contact;
pub mod financial;
pub mod identity;
pub mod suppress;
pub mod tracking;

use serde::{Deserialize, Serialize};

/// Severity of a finding, from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Jurisdiction a rule belongs to.
///
/// A scan for a narrower jurisdiction also runs the broader rules:
/// Netherlands includes EU-wide and global rules, EU includes global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    #[default]
    #[serde(alias = "nl")]
    Netherlands,
    #[serde(alias = "eu")]
    EuropeanUnion,
    Global,
}

impl Jurisdiction {
    /// Check whether a rule tagged `rule_jurisdiction` applies under this
    /// scan jurisdiction.
    pub fn includes(&self, rule_jurisdiction: Jurisdiction) -> bool {
        match self {
            Jurisdiction::Netherlands => true,
            Jurisdiction::EuropeanUnion => rule_jurisdiction != Jurisdiction::Netherlands,
            Jurisdiction::Global => rule_jurisdiction == Jurisdiction::Global,
        }
    }

    /// Parse from string (CLI flag values)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nl" | "netherlands" => Some(Jurisdiction::Netherlands),
            "eu" | "europeanunion" | "european-union" => Some(Jurisdiction::EuropeanUnion),
            "global" => Some(Jurisdiction::Global),
            _ => None,
        }
    }
}

/// PII category a rule detects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Dutch citizen service number (burgerservicenummer)
    Bsn,
    /// International bank account number
    Iban,
    /// Payment card number
    CreditCard,
    /// Dutch Chamber of Commerce registration number
    Kvk,
    /// Dutch VAT identification number
    Btw,
    Email,
    Phone,
    /// Dutch postal code
    Postcode,
    /// IP address (online identifier under GDPR Recital 30)
    IpAddress,
    /// Third-party tracking script or cookie write
    Tracker,
}

/// A PII detection rule definition
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// PII category this rule detects
    pub category: Category,

    /// Jurisdiction the rule belongs to
    pub jurisdiction: Jurisdiction,

    /// Regex pattern to match
    pub pattern: &'static str,

    /// Checksum or format validator; a match that fails validation is
    /// dropped, never reported
    pub validator: Option<fn(&str) -> bool>,

    /// Legal basis reference (GDPR/UAVG article)
    pub legal_basis: &'static str,

    /// Default severity of a validated match
    pub severity: Severity,

    /// Confidence assigned to a bare match, before context boost
    pub base_confidence: f64,

    /// Nearby keywords that raise confidence (matched case-insensitively)
    pub context: &'static [&'static str],
}

impl PatternRule {
    /// Create a new rule
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: &'static str,
        category: Category,
        jurisdiction: Jurisdiction,
        pattern: &'static str,
        validator: Option<fn(&str) -> bool>,
        legal_basis: &'static str,
        severity: Severity,
        base_confidence: f64,
        context: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            category,
            jurisdiction,
            pattern,
            validator,
            legal_basis,
            severity,
            base_confidence,
            context,
        }
    }
}

/// All rule tables in declaration order.
pub fn all_rules() -> Vec<&'static PatternRule> {
    identity::RULES
        .iter()
        .chain(financial::RULES.iter())
        .chain(contact::RULES.iter())
        .chain(tracking::RULES.iter())
        .collect()
}

/// Rules applicable under the given scan jurisdiction.
pub fn rules_for_jurisdiction(jurisdiction: Jurisdiction) -> Vec<&'static PatternRule> {
    all_rules()
        .into_iter()
        .filter(|r| jurisdiction.includes(r.jurisdiction))
        .collect()
}
