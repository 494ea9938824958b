//! Financial and business registration number rules

use crate::rules::{checksum, Category, Jurisdiction, PatternRule, Severity};

pub const RULES: &[PatternRule] = &[
    PatternRule::new(
        "iban",
        Category::Iban,
        Jurisdiction::EuropeanUnion,
        r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b",
        Some(checksum::iban_valid),
        "GDPR art. 4(1), art. 32",
        Severity::High,
        0.8,
        &["iban", "bank", "rekening", "account number"],
    ),
    PatternRule::new(
        "credit-card",
        Category::CreditCard,
        Jurisdiction::Global,
        r"\b(?:\d{4}[ -]?){3}\d{4}\b",
        Some(checksum::luhn_valid),
        "GDPR art. 4(1), art. 32",
        Severity::High,
        0.75,
        &["card", "creditcard", "visa", "mastercard", "pan"],
    ),
    // KvK numbers are eight bare digits with no check digit, so the base
    // confidence sits below the reporting threshold: only a nearby registry
    // keyword lifts a match into the findings.
    PatternRule::new(
        "kvk-number",
        Category::Kvk,
        Jurisdiction::Netherlands,
        r"\b\d{8}\b",
        Some(checksum::kvk_valid),
        "Handelsregisterwet; GDPR art. 4(1)",
        Severity::Medium,
        0.4,
        &["kvk", "kamer van koophandel", "chamber of commerce", "handelsregister"],
    ),
    PatternRule::new(
        "btw-number",
        Category::Btw,
        Jurisdiction::Netherlands,
        r"\bNL\d{9}B\d{2}\b",
        Some(checksum::btw_valid),
        "Wet OB art. 2a; GDPR art. 4(1)",
        Severity::Medium,
        0.85,
        &["btw", "vat", "omzetbelasting"],
    ),
];
