//! National identity number rules
//!
//! BSN detection is the highest-stakes rule in the library: an exposed,
//! unmasked citizen service number is special-category data under the UAVG.

use crate::rules::{checksum, Category, Jurisdiction, PatternRule, Severity};

pub const RULES: &[PatternRule] = &[
    PatternRule::new(
        "bsn-bare",
        Category::Bsn,
        Jurisdiction::Netherlands,
        r"\b\d{9}\b",
        Some(checksum::bsn_valid),
        "UAVG art. 46; GDPR art. 87",
        Severity::Critical,
        0.7,
        &[
            "bsn",
            "burgerservicenummer",
            "sofinummer",
            "citizen service number",
            "sofi",
        ],
    ),
    PatternRule::new(
        "bsn-formatted",
        Category::Bsn,
        Jurisdiction::Netherlands,
        r"\b\d{4}[.\- ]\d{2}[.\- ]\d{3}\b",
        Some(checksum::bsn_valid),
        "UAVG art. 46; GDPR art. 87",
        Severity::Critical,
        0.7,
        &[
            "bsn",
            "burgerservicenummer",
            "sofinummer",
            "citizen service number",
        ],
    ),
];
