// Presence of the customer, authorization and account sections
use crate::patterns::REQUIRED_SECTIONS;
use loa_types::{categories, IntegrityIssue};

/// Names of the section groups with no matching marker in `text`
pub fn missing_sections(text: &str) -> Vec<&'static str> {
    REQUIRED_SECTIONS
        .iter()
        .filter(|(_, patterns)| !patterns.iter().any(|p| p.is_match(text)))
        .map(|(name, _)| *name)
        .collect()
}

/// Flags the document only when every section group is absent
pub fn check_required_sections(text: &str) -> Vec<IntegrityIssue> {
    let missing = missing_sections(text);
    if missing.len() < REQUIRED_SECTIONS.len() {
        return Vec::new();
    }

    vec![IntegrityIssue::critical(
        categories::MISSING_SECTIONS,
        format!(
            "Missing ALL {} required sections: {}",
            missing.len(),
            missing.join(", ")
        ),
        "Document appears completely corrupted or interleaved",
    )]
}
