// Character-level and encoding corruption
use crate::patterns::{SPECIAL_CHAR_SEQUENCE_PATTERN, UNUSUAL_CHAR_PATTERN};
use loa_types::{categories, IntegrityIssue};

const MAX_SPECIAL_SEQUENCES: usize = 50;
const MAX_NON_ASCII_SEQUENCES: usize = 30;

pub fn check_character_corruption(text: &str) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let special: Vec<&str> = SPECIAL_CHAR_SEQUENCE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if special.len() > MAX_SPECIAL_SEQUENCES {
        issues.push(IntegrityIssue::warning(
            categories::CHARACTER_CORRUPTION,
            format!("Detected {} sequences of special characters", special.len()),
            format!("Examples: {}", special[..3].join(" | ")),
        ));
    }

    let unusual = UNUSUAL_CHAR_PATTERN.find_iter(text).count();
    if unusual > MAX_NON_ASCII_SEQUENCES {
        issues.push(IntegrityIssue::warning(
            categories::CHARACTER_CORRUPTION,
            format!(
                "Detected {} sequences of unusual characters - possible encoding issues",
                unusual
            ),
            "Found non-ASCII character sequences",
        ));
    }

    issues
}
