//! Tracking and cookie consent rules
//!
//! Matched against script and cookie segments extracted by the website
//! scanner. A third-party analytics loader before any consent gate is the
//! most common violation the product reports on Dutch websites.

use crate::rules::{Category, Jurisdiction, PatternRule, Severity};

const EPRIVACY: &str = "ePrivacy dir. art. 5(3); Telecommunicatiewet art. 11.7a";

pub const RULES: &[PatternRule] = &[
    PatternRule::new(
        "tracker-google-analytics",
        Category::Tracker,
        Jurisdiction::EuropeanUnion,
        r"(?i)\bgoogle-analytics\.com|\bwww\.googletagmanager\.com|\bgtag\(",
        None,
        EPRIVACY,
        Severity::Medium,
        0.9,
        &[],
    ),
    PatternRule::new(
        "tracker-facebook-pixel",
        Category::Tracker,
        Jurisdiction::EuropeanUnion,
        r"(?i)connect\.facebook\.net|\bfbq\(",
        None,
        EPRIVACY,
        Severity::Medium,
        0.9,
        &[],
    ),
    PatternRule::new(
        "tracker-hotjar",
        Category::Tracker,
        Jurisdiction::EuropeanUnion,
        r"(?i)static\.hotjar\.com|\bhj\(",
        None,
        EPRIVACY,
        Severity::Medium,
        0.9,
        &[],
    ),
    PatternRule::new(
        "tracker-doubleclick",
        Category::Tracker,
        Jurisdiction::EuropeanUnion,
        r"(?i)doubleclick\.net",
        None,
        EPRIVACY,
        Severity::Medium,
        0.9,
        &[],
    ),
    PatternRule::new(
        "cookie-write",
        Category::Tracker,
        Jurisdiction::EuropeanUnion,
        r"(?i)document\.cookie\s*=",
        None,
        EPRIVACY,
        Severity::Low,
        0.8,
        &[],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_analytics_loader_matches() {
        let re = Regex::new(RULES[0].pattern).unwrap();
        assert!(re.is_match("https://www.google-analytics.com/analytics.js"));
        assert!(re.is_match("gtag('config', 'G-XXXX');"));
        assert!(!re.is_match("https://example.com/app.js"));
    }

    #[test]
    fn test_cookie_write_matches() {
        let re = Regex::new(RULES[4].pattern).unwrap();
        assert!(re.is_match("document.cookie = 'id=1'"));
        assert!(re.is_match("document.cookie='tracking=yes'"));
        assert!(!re.is_match("var c = document.cookie;"));
    }
}
