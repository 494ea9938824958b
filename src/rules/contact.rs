//! Contact detail and online identifier rules

use crate::rules::{checksum, Category, Jurisdiction, PatternRule, Severity};

pub const RULES: &[PatternRule] = &[
    PatternRule::new(
        "email",
        Category::Email,
        Jurisdiction::Global,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        None,
        "GDPR art. 4(1)",
        Severity::Medium,
        0.95,
        &["email", "e-mail"],
    ),
    PatternRule::new(
        "phone-nl",
        Category::Phone,
        Jurisdiction::Netherlands,
        r"(?:\+31|\b0031|\b0)[ -]?[1-9](?:[ -]?\d){8}\b",
        None,
        "GDPR art. 4(1)",
        Severity::Medium,
        0.65,
        &["phone", "telefoon", "telefoonnummer", "mobiel", "mobile"],
    ),
    PatternRule::new(
        "postcode-nl",
        Category::Postcode,
        Jurisdiction::Netherlands,
        r"\b[1-9]\d{3} ?[A-Z]{2}\b",
        Some(checksum::postcode_valid),
        "GDPR art. 4(1)",
        Severity::Low,
        0.6,
        &["postcode", "postal", "address", "adres"],
    ),
    PatternRule::new(
        "ipv4",
        Category::IpAddress,
        Jurisdiction::Global,
        r"\b(?:\d{1,3}\.){3}\d{1,3}\b",
        Some(checksum::ipv4_valid),
        "GDPR recital 30, art. 4(1)",
        Severity::Low,
        0.6,
        &["ip address", "ipv4", "remote_addr", "client_ip", "x-forwarded-for"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_email_shape() {
        let re = Regex::new(RULES[0].pattern).unwrap();
        assert!(re.is_match("jan.jansen@example.nl"));
        assert!(re.is_match("info+sales@bedrijf.amsterdam"));
        assert!(!re.is_match("not an email"));
    }

    #[test]
    fn test_phone_shape() {
        let re = Regex::new(RULES[1].pattern).unwrap();
        assert!(re.is_match("+31 6 12345678"));
        assert!(re.is_match("0612345678"));
        assert!(re.is_match("010-1234567"));

        // Digits embedded in a larger run
        assert!(!re.is_match("990612345678990"));
    }

    #[test]
    fn test_postcode_shape() {
        let re = Regex::new(RULES[2].pattern).unwrap();
        assert!(re.is_match("1012 AB"));
        assert!(re.is_match("9715CD"));
        assert!(!re.is_match("0123 AB"));
        assert!(!re.is_match("1012 ab"));
    }

    #[test]
    fn test_ipv4_shape() {
        let re = Regex::new(RULES[3].pattern).unwrap();
        assert!(re.is_match("10.0.0.1"));
        assert!(re.is_match("192.168.255.255"));
    }
}
