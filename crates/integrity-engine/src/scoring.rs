//! Confidence scoring and human-readable summaries
use loa_types::IntegrityIssue;
use std::collections::BTreeSet;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 1.0 minus the summed severity penalties, clamped to [0, 1]
pub fn confidence_score(issues: &[IntegrityIssue]) -> f64 {
    if issues.is_empty() {
        return 1.0;
    }
    let penalty: f64 = issues.iter().map(|i| i.severity.penalty()).sum();
    round2((1.0 - penalty).clamp(0.0, 1.0))
}

pub fn generate_summary(critical: &[&IntegrityIssue], warnings: &[&IntegrityIssue]) -> String {
    if critical.is_empty() && warnings.is_empty() {
        return "Document integrity verified - no issues detected".to_string();
    }

    if critical.is_empty() {
        return format!(
            "Document appears valid but has {} warning(s) - review recommended",
            warnings.len()
        );
    }

    let categories: BTreeSet<&str> = critical.iter().map(|i| i.category.as_str()).collect();
    let mut parts = vec![format!(
        "{} critical issue(s) ({})",
        critical.len(),
        categories.into_iter().collect::<Vec<_>>().join(", ")
    )];
    if !warnings.is_empty() {
        parts.push(format!("{} warning(s)", warnings.len()));
    }

    format!("DOCUMENT INTEGRITY COMPROMISED: {}", parts.join("; "))
}
