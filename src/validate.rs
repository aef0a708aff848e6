//! Pre-write artifact validation.
//!
//! Stage 2 of the build pipeline. Each checkable artifact has its own
//! check function returning a [`ValidationReport`]: an ordered list of
//! human-readable `PASS:`/`FAIL:` outcomes plus an aggregate `passed`
//! flag. Reports are serialized into the build manifest, so the exact
//! message strings are part of the package contract.
//!
//! A report fails as soon as any single check fails; the writer refuses
//! to persist anything unless all three reports pass.

use crate::config::BuildConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Elements the page component must contain verbatim.
const REQUIRED_PAGE_ELEMENTS: &[&str] =
    &["<main>", "</main>", "BaseLayout", "hero-section", "audit-form"];

/// Selectors the stylesheet must contain as raw text.
const REQUIRED_SELECTORS: &[&str] =
    &[".audit-summary-grid", ".risk-grid", ".faq-list", ".audit-form"];

/// Outcome of validating one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Logical AND of every individual check.
    pub passed: bool,
    /// Ordered `PASS:`/`FAIL:` lines, one per check.
    pub checks: Vec<String>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            passed: true,
            checks: Vec::new(),
        }
    }

    fn pass(&mut self, msg: String) {
        self.checks.push(msg);
    }

    fn fail(&mut self, msg: String) {
        self.passed = false;
        self.checks.push(msg);
    }

    /// Record a byte-length floor check.
    fn check_size(&mut self, size: usize, min: usize) {
        if size < min {
            self.fail(format!("FAIL: Size {size}B < {min}B minimum"));
        } else {
            self.pass(format!("PASS: Size {size}B"));
        }
    }
}

/// Validate the Astro page component.
///
/// Checks the UTF-8 byte-length floor, each required element, and the
/// presence of form labels. The label check accepts either a
/// case-insensitive `label for=` or an exact `label for="` — an OR of
/// two patterns, kept tolerant on purpose.
pub fn check_astro(content: &str, config: &BuildConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.check_size(content.len(), config.min_astro_size);

    for elem in REQUIRED_PAGE_ELEMENTS {
        if content.contains(elem) {
            report.pass(format!("PASS: Contains '{elem}'"));
        } else {
            report.fail(format!("FAIL: Missing '{elem}'"));
        }
    }

    if content.to_lowercase().contains("label for=") || content.contains("label for=\"") {
        report.pass("PASS: Form labels present".to_string());
    } else {
        report.fail("FAIL: Missing form labels".to_string());
    }

    report
}

/// Validate the JSON-LD document.
///
/// `@context` must equal `https://schema.org` exactly, and every
/// configured required type must appear among the `@type` values of the
/// top-level graph nodes. Set comparison — order and duplicates are
/// irrelevant.
pub fn check_schema(schema: &Value, config: &BuildConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    if schema.get("@context").and_then(Value::as_str) == Some("https://schema.org") {
        report.pass("PASS: Valid @context".to_string());
    } else {
        report.fail("FAIL: Invalid @context".to_string());
    }

    let found_types: HashSet<&str> = schema
        .get("@graph")
        .and_then(Value::as_array)
        .map(|graph| {
            graph
                .iter()
                .filter_map(|node| node.get("@type").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    for required in &config.required_schema_types {
        if found_types.contains(required.as_str()) {
            report.pass(format!("PASS: Contains {required}"));
        } else {
            report.fail(format!("FAIL: Missing {required}"));
        }
    }

    report
}

/// Validate the stylesheet: byte-length floor plus required selectors.
pub fn check_css(content: &str, config: &BuildConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.check_size(content.len(), config.min_css_size);

    for sel in REQUIRED_SELECTORS {
        if content.contains(sel) {
            report.pass(format!("PASS: Contains '{sel}'"));
        } else {
            report.fail(format!("FAIL: Missing '{sel}'"));
        }
    }

    report
}
