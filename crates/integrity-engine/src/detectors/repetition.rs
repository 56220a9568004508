// Duplicated sentences, a symptom of repeated or interleaved pages
use crate::patterns::{char_len, head_chars, SENTENCE_SPLIT_PATTERN};
use loa_types::{categories, IntegrityIssue};
use std::collections::HashMap;

const MIN_SENTENCE_CHARS: usize = 30;
const MAX_DUPLICATE_SENTENCES: usize = 30;

/// Distinct repeated sentences in first-occurrence order
pub fn duplicate_sentences(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for sentence in SENTENCE_SPLIT_PATTERN.split(text) {
        let clean = sentence.trim().to_lowercase();
        if char_len(&clean) <= MIN_SENTENCE_CHARS {
            continue;
        }
        let count = counts.entry(clean.clone()).or_insert(0);
        if *count == 0 {
            order.push(clean);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|s| counts.get(s).copied().unwrap_or(0) > 1)
        .collect()
}

pub fn check_repeated_fragments(text: &str) -> Vec<IntegrityIssue> {
    let duplicates = duplicate_sentences(text);
    if duplicates.len() <= MAX_DUPLICATE_SENTENCES {
        return Vec::new();
    }

    let examples: Vec<String> = duplicates.iter().take(2).map(|s| head_chars(s, 50)).collect();
    vec![IntegrityIssue::warning(
        categories::REPEATED_CONTENT,
        format!(
            "Detected {} repeated text segments - possible page duplication",
            duplicates.len()
        ),
        format!("Examples: {}", examples.join(" | ")),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeated_document(distinct: usize) -> String {
        let page: String = (0..distinct)
            .map(|i| format!("This authorization sentence number {} is repeated. ", i))
            .collect();
        format!("{}{}", page, page)
    }

    #[test]
    fn test_counts_case_insensitive_duplicates() {
        let text = "The customer authorizes release of data. THE CUSTOMER AUTHORIZES RELEASE OF DATA. Short one. Short one.";
        let dups = duplicate_sentences(text);
        assert_eq!(dups, vec!["the customer authorizes release of data".to_string()]);
    }

    #[test]
    fn test_flags_extreme_duplication() {
        let issues = check_repeated_fragments(&repeated_document(31));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.starts_with("Detected 31 repeated"));
        assert!(issues[0]
            .evidence
            .starts_with("Examples: this authorization sentence number 0 is repeated"));
    }

    #[test]
    fn test_tolerates_thirty_duplicates() {
        assert!(check_repeated_fragments(&repeated_document(30)).is_empty());
    }
}
