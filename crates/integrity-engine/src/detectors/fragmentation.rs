// Fragmented text: dangling capitals and short unterminated lines

use crate::patterns::{char_len, FORM_LABEL_PATTERN, SINGLE_LETTER_PATTERN, TERMINAL_PUNCTUATION};
use loa_types::{categories, IntegrityIssue};

const MAX_SINGLE_LETTER_BREAKS: usize = 50;
const MAX_SHORT_FRAGMENTS: usize = 75;

pub fn check_text_fragmentation(text: &str) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let breaks: Vec<&str> = SINGLE_LETTER_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if breaks.len() > MAX_SINGLE_LETTER_BREAKS {
        issues.push(IntegrityIssue::critical(
            categories::TEXT_FRAGMENTATION,
            "Detected instances of single capital letters with line breaks - possible text fragmentation",
            format!("Examples: {}", breaks[..3].join(", ")),
        ));
    }

    let mut fragment_count = 0;
    let mut examples: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let stripped = line.trim();
        if is_dangling_fragment(stripped) {
            fragment_count += 1;
            if examples.len() < 3 {
                examples.push(stripped);
            }
        }
    }

    if fragment_count > MAX_SHORT_FRAGMENTS {
        issues.push(IntegrityIssue::critical(
            categories::TEXT_FRAGMENTATION,
            "Detected incomplete text fragments - document may be corrupted",
            format!("Examples: {}", examples.join(" | ")),
        ));
    }

    issues
}

/// Short line with letters, no terminal punctuation, and not a form label
fn is_dangling_fragment(line: &str) -> bool {
    let len = char_len(line);
    if len <= 5 || len >= 30 {
        return false;
    }
    if line.ends_with(TERMINAL_PUNCTUATION) {
        return false;
    }
    line.chars().any(char::is_alphabetic) && !FORM_LABEL_PATTERN.is_match(line)
}
