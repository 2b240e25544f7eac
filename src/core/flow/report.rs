use crate::core::flow::finding::Finding;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Merged outcome of a validation run.
///
/// `valid` is true iff `errors` is empty; warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationResult {
    /// Split findings by whether they block, keeping their relative order.
    pub fn from_findings(findings: impl IntoIterator<Item = Finding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(Finding::is_blocking);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Every finding, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.findings().any(|finding| finding.code == code)
    }
}

/// Render a multi-line human-readable summary of `result`.
pub fn format_findings(result: &ValidationResult) -> String {
    let mut out = String::new();
    if result.valid {
        out.push_str("Validation passed");
    } else {
        let _ = write!(
            out,
            "Validation failed with {} error(s) and {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }

    for (title, section) in [("Errors", &result.errors), ("Warnings", &result.warnings)] {
        if section.is_empty() {
            continue;
        }
        let _ = write!(out, "\n{}:", title);
        for finding in section {
            let _ = write!(out, "\n  - {}", finding);
        }
    }
    out
}
