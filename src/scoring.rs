//! Compliance scoring
//!
//! A pure function over the finding list: same findings, same score. The
//! numeric weights are the product's default policy and are deliberately
//! kept in one place.

use serde::Serialize;

use crate::output::Finding;
use crate::rules::Severity;

/// Risk bucket derived from the compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Score deduction per finding, by severity.
fn penalty(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 20,
        Severity::High => 10,
        Severity::Medium => 5,
        Severity::Low => 2,
    }
}

/// Compute the 0-100 compliance score and risk bucket for a finding list.
///
/// Starts at 100 and subtracts a per-finding penalty, flooring at 0. A
/// single Critical finding forces the Critical bucket regardless of the
/// numeric score: one exposed national ID number is not averaged away by
/// an otherwise clean scan.
pub fn score(findings: &[Finding]) -> (u8, RiskLevel) {
    let total_penalty: u32 = findings.iter().map(|f| penalty(f.severity)).sum();
    let score = 100u32.saturating_sub(total_penalty) as u8;

    let has_critical = findings.iter().any(|f| f.severity == Severity::Critical);
    let risk = if has_critical {
        RiskLevel::Critical
    } else {
        bucket(score)
    };

    (score, risk)
}

/// Map a score to its risk bucket.
fn bucket(score: u8) -> RiskLevel {
    match score {
        90..=100 => RiskLevel::Low,
        70..=89 => RiskLevel::Medium,
        40..=69 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Location;
    use crate::rules::Category;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "test-rule",
            category: Category::Email,
            severity,
            legal_basis: "GDPR art. 4(1)",
            location: Location {
                unit: "t".to_string(),
                offset: 0,
            },
            excerpt: "ja****nl".to_string(),
            digest: String::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_no_findings_is_clean() {
        let (s, risk) = score(&[]);
        assert_eq!(s, 100);
        assert_eq!(risk, RiskLevel::Low);
    }

    #[test]
    fn test_penalties_accumulate() {
        let findings = vec![
            finding(Severity::High),
            finding(Severity::Medium),
            finding(Severity::Low),
        ];
        let (s, risk) = score(&findings);
        assert_eq!(s, 83);
        assert_eq!(risk, RiskLevel::Medium);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let findings: Vec<Finding> = (0..10).map(|_| finding(Severity::Critical)).collect();
        let (s, risk) = score(&findings);
        assert_eq!(s, 0);
        assert_eq!(risk, RiskLevel::Critical);
    }

    #[test]
    fn test_single_critical_forces_bucket() {
        // 100 - 20 = 80 would be Medium, but the override applies
        let (s, risk) = score(&[finding(Severity::Critical)]);
        assert_eq!(s, 80);
        assert_eq!(risk, RiskLevel::Critical);
    }

    #[test]
    fn test_critical_override_with_other_findings() {
        let findings = vec![finding(Severity::Critical), finding(Severity::Low)];
        let (_, risk) = score(&findings);
        assert_eq!(risk, RiskLevel::Critical);
    }

    #[test]
    fn test_low_findings_stay_low_risk() {
        let findings = vec![finding(Severity::Low), finding(Severity::Low)];
        let (s, risk) = score(&findings);
        assert_eq!(s, 96);
        assert_eq!(risk, RiskLevel::Low);
    }

    #[test]
    fn test_deterministic() {
        let findings = vec![finding(Severity::High), finding(Severity::Critical)];
        assert_eq!(score(&findings), score(&findings));
    }

    #[test]
    fn test_buckets() {
        assert_eq!(bucket(100), RiskLevel::Low);
        assert_eq!(bucket(90), RiskLevel::Low);
        assert_eq!(bucket(89), RiskLevel::Medium);
        assert_eq!(bucket(70), RiskLevel::Medium);
        assert_eq!(bucket(69), RiskLevel::High);
        assert_eq!(bucket(40), RiskLevel::High);
        assert_eq!(bucket(39), RiskLevel::Critical);
        assert_eq!(bucket(0), RiskLevel::Critical);
    }
}
