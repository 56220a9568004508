// Non-contiguous text flow
use crate::patterns::EXCESSIVE_SPACING_PATTERN;
use loa_types::{categories, IntegrityIssue};

const MAX_SPACING_RUNS: usize = 50;
const MAX_PAREN_IMBALANCE: usize = 30;

pub fn check_sentence_continuity(text: &str) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    let runs: Vec<&str> = EXCESSIVE_SPACING_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if runs.len() > MAX_SPACING_RUNS {
        let examples: Vec<&str> = runs.iter().take(3).map(|s| s.trim()).collect();
        issues.push(IntegrityIssue::critical(
            categories::NON_CONTIGUOUS_FLOW,
            format!(
                "Detected {} instances of excessive spacing - text flow disrupted",
                runs.len()
            ),
            format!("Examples: {}", examples.join(" | ")),
        ));
    }

    let open = text.matches('(').count();
    let close = text.matches(')').count();
    let imbalance = open.abs_diff(close);
    if imbalance > MAX_PAREN_IMBALANCE {
        issues.push(IntegrityIssue::warning(
            categories::NON_CONTIGUOUS_FLOW,
            format!(
                "Unbalanced parentheses: {} open, {} close - possible text corruption",
                open, close
            ),
            format!("Difference: {}", imbalance),
        ));
    }

    issues
}
