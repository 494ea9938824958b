//! Pattern library: compiled rules and text matching
//!
//! The library is built once at startup and shared read-only across scan
//! workers. Matching is a three-stage pipeline: regex candidates, checksum
//! validation, then per-category overlap resolution so a span is never
//! counted twice for the same category.

use aho_corasick::AhoCorasick;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::output::{Finding, Location};
use crate::rules::{self, Jurisdiction, PatternRule};

/// Confidence added when a rule's context keyword appears near a match.
const CONTEXT_BOOST: f64 = 0.25;

/// Byte window around a match inspected for context keywords.
const CONTEXT_WINDOW: usize = 40;

struct CompiledRule {
    def: &'static PatternRule,
    regex: Regex,
}

/// The compiled, immutable pattern library.
pub struct PatternLibrary {
    jurisdiction: Jurisdiction,
    rules: Vec<CompiledRule>,
    keywords: AhoCorasick,
    keyword_terms: Vec<&'static str>,
    min_confidence: f64,
}

impl PatternLibrary {
    /// Compile every rule applicable under `jurisdiction`.
    ///
    /// A rule that fails to compile is a packaging defect and aborts
    /// initialization.
    pub fn compile(jurisdiction: Jurisdiction, min_confidence: f64) -> Result<Self> {
        let defs = rules::rules_for_jurisdiction(jurisdiction);

        let mut compiled = Vec::with_capacity(defs.len());
        for def in defs {
            let regex = Regex::new(def.pattern).map_err(|source| Error::Rule {
                id: def.id,
                source,
            })?;
            compiled.push(CompiledRule { def, regex });
        }

        let mut keyword_terms: Vec<&'static str> = compiled
            .iter()
            .flat_map(|r| r.def.context.iter().copied())
            .collect();
        keyword_terms.sort_unstable();
        keyword_terms.dedup();

        let keywords = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keyword_terms)?;

        debug!(
            rules = compiled.len(),
            keywords = keyword_terms.len(),
            ?jurisdiction,
            "pattern library compiled"
        );

        Ok(Self {
            jurisdiction,
            rules: compiled,
            keywords,
            keyword_terms,
            min_confidence,
        })
    }

    /// The jurisdiction this library was compiled for.
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    /// Number of compiled rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run all patterns against `text`, reporting findings located at
    /// `unit`. Returns an empty list for empty input; matching itself
    /// cannot fail.
    pub fn match_text(&self, text: &str, unit: &str) -> Vec<Finding> {
        if text.is_empty() {
            return Vec::new();
        }

        // One keyword pass shared by every rule's context check.
        let keyword_hits: Vec<(usize, usize)> = self
            .keywords
            .find_iter(text)
            .map(|m| (m.pattern().as_usize(), m.start()))
            .collect();

        let mut candidates: Vec<Candidate> = Vec::new();

        for rule in &self.rules {
            for m in rule.regex.find_iter(text) {
                let matched = m.as_str();

                if let Some(validate) = rule.def.validator {
                    if !validate(matched) {
                        continue;
                    }
                }

                let mut confidence = rule.def.base_confidence;
                if self.context_near(&keyword_hits, rule.def, m.start()) {
                    confidence = (confidence + CONTEXT_BOOST).min(1.0);
                }

                if confidence < self.min_confidence {
                    continue;
                }

                candidates.push(Candidate {
                    def: rule.def,
                    start: m.start(),
                    end: m.end(),
                    matched,
                    confidence,
                });
            }
        }

        // First-match-wins per category: sort by position and drop any
        // candidate overlapping an already-kept match of the same category.
        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(a.def.id.cmp(b.def.id))
        });

        let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
        for c in candidates {
            let overlaps = kept
                .iter()
                .any(|k| k.def.category == c.def.category && c.start < k.end && k.start < c.end);
            if !overlaps {
                kept.push(c);
            }
        }

        kept.into_iter()
            .map(|c| Finding {
                rule_id: c.def.id,
                category: c.def.category,
                severity: c.def.severity,
                legal_basis: c.def.legal_basis,
                location: Location {
                    unit: unit.to_string(),
                    offset: c.start,
                },
                excerpt: mask(c.matched),
                digest: digest(c.matched),
                confidence: c.confidence,
            })
            .collect()
    }

    /// Check whether any of the rule's context keywords was seen within
    /// `CONTEXT_WINDOW` bytes before the match.
    fn context_near(&self, hits: &[(usize, usize)], def: &PatternRule, start: usize) -> bool {
        if def.context.is_empty() {
            return false;
        }

        hits.iter().any(|&(term_idx, pos)| {
            let term = self.keyword_terms[term_idx];
            def.context.contains(&term)
                && pos < start
                && start - pos <= CONTEXT_WINDOW + term.len()
        })
    }
}

struct Candidate<'t> {
    def: &'static PatternRule,
    start: usize,
    end: usize,
    matched: &'t str,
    confidence: f64,
}

/// Mask a matched value for safe storage: keep the first and last two
/// characters, drop the middle.
fn mask(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}****{}", head, tail)
}

/// SHA-256 digest of the raw match, so two scans can correlate a value
/// without either storing it.
fn digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Category, Severity};

    fn library() -> PatternLibrary {
        PatternLibrary::compile(Jurisdiction::Netherlands, 0.5).unwrap()
    }

    #[test]
    fn test_compile_all_jurisdictions() {
        for j in [
            Jurisdiction::Netherlands,
            Jurisdiction::EuropeanUnion,
            Jurisdiction::Global,
        ] {
            let lib = PatternLibrary::compile(j, 0.5).unwrap();
            assert!(lib.rule_count() > 0);
        }
    }

    #[test]
    fn test_valid_bsn_with_label() {
        let lib = library();
        let findings = lib.match_text("BSN: 123456782", "test.txt");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Bsn);
        assert_eq!(findings[0].severity, Severity::Critical);
        // Label within the context window raises confidence above base
        assert!(findings[0].confidence > 0.7);
    }

    #[test]
    fn test_invalid_bsn_never_reported() {
        let lib = library();
        assert!(lib.match_text("BSN: 111222333", "test.txt").is_empty());
        assert!(lib.match_text("BSN: 123456789", "test.txt").is_empty());
    }

    #[test]
    fn test_match_is_masked_and_digested() {
        let lib = library();
        let findings = lib.match_text("123456782", "test.txt");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].excerpt, "12****82");
        assert_eq!(findings[0].digest.len(), 64);
        assert!(!findings[0].excerpt.contains("345678"));
    }

    #[test]
    fn test_kvk_needs_context() {
        let lib = library();

        // A bare eight-digit number stays below the confidence floor
        assert!(lib.match_text("order 27312152 shipped", "test.txt").is_empty());

        // The registry label lifts it over
        let findings = lib.match_text("KvK: 27312152", "test.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Kvk);
    }

    #[test]
    fn test_iban_checksum_filters() {
        let lib = library();

        let findings = lib.match_text("rekening NL91ABNA0417164300", "t");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Iban);

        assert!(lib.match_text("rekening NL92ABNA0417164300", "t").is_empty());
    }

    #[test]
    fn test_multiple_findings_sorted_by_offset() {
        let lib = library();
        let findings = lib.match_text(
            "mail jan@example.nl or call +31 6 12345678",
            "t",
        );

        assert_eq!(findings.len(), 2);
        assert!(findings[0].location.offset < findings[1].location.offset);
    }

    #[test]
    fn test_deterministic() {
        let lib = library();
        let text = "BSN 123456782, iban NL91ABNA0417164300, jan@example.nl";
        let a = lib.match_text(text, "t");
        let b = lib.match_text(text, "t");

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.rule_id, y.rule_id);
            assert_eq!(x.location.offset, y.location.offset);
            assert_eq!(x.digest, y.digest);
        }
    }

    #[test]
    fn test_eu_library_skips_dutch_rules() {
        let lib = PatternLibrary::compile(Jurisdiction::EuropeanUnion, 0.5).unwrap();
        // BSN is a Netherlands rule
        assert!(lib.match_text("BSN: 123456782", "t").is_empty());
        // IBAN is EU-wide
        assert!(!lib.match_text("NL91ABNA0417164300", "t").is_empty());
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        let lib = library();
        assert!(lib.match_text("", "t").is_empty());
        assert!(lib.match_text("\u{fffd}\u{fffd}\u{fffd}", "t").is_empty());
    }
}
